//! quizkit-core: quiz text parsing, session state, and scoring.
//!
//! Raw quiz text (already fetched by the caller) goes through the
//! [`parser`] into an immutable [`QuizSet`]. A [`QuizSession`] drives one
//! attempt over it, and [`score::score`] produces the result view.

pub mod config;
pub mod error;
pub mod grammar;
pub mod model;
pub mod parser;
pub mod report;
pub mod score;
pub mod session;

pub use config::{load_config, load_config_from, QuizkitConfig};
pub use error::{GrammarError, ParseError, SessionError};
pub use grammar::Grammar;
pub use model::{CorrectAnswer, QuestionRecord, QuizSet, Selection};
pub use parser::{parse, ParseOutcome, QuizParser};
pub use score::{score, QuestionReview, QuizResult};
pub use session::{Advance, CurrentView, Phase, QuizSession};
