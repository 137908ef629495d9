//! The `quizkit init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    if std::path::Path::new("quizkit.toml").exists() {
        println!("quizkit.toml already exists, skipping.");
    } else {
        std::fs::write("quizkit.toml", SAMPLE_CONFIG)?;
        println!("Created quizkit.toml");
    }

    std::fs::create_dir_all("quizzes")?;
    let example_path = std::path::Path::new("quizzes/example.txt");
    if example_path.exists() {
        println!("quizzes/example.txt already exists, skipping.");
    } else {
        std::fs::write(example_path, EXAMPLE_QUIZ)?;
        println!("Created quizzes/example.txt");
    }

    println!("\nNext steps:");
    println!("  1. Adjust the answer markers in quizkit.toml to match your generator");
    println!("  2. Run: quizkit validate --input quizzes/example.txt");
    println!("  3. Run: quizkit take --input quizzes/example.txt --output quizkit-results");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# quizkit configuration

output_dir = "./quizkit-results"
formats = ["json", "html"]

[grammar]
# Regex for the start of a numbered item.
item_pattern = '(?m)^[ \t]*\d+\.\s'
# Choice letters in index order; a choice line looks like "A) text".
choice_letters = "ABCD"
choice_delimiter = ")"
# Phrases that open the answer line, matched case-insensitively.
answer_markers = ["Réponse correcte", "Correct answer"]
"#;

const EXAMPLE_QUIZ: &str = "Here is your quiz:

1. [Document: rust-book.pdf] - Which keyword makes a binding mutable?
   A) var
   B) mut
   C) let
   D) static
   Correct answer: B - bindings are immutable unless declared with mut

2. [Document: rust-book.pdf] - What does the ? operator do on an Err value?
   A) Panics
   B) Ignores the error
   C) Returns the error from the enclosing function
   D) Converts it to None
   Correct answer: C - it propagates the error to the caller

3. [Document: rust-book.pdf] - Which type owns a heap-allocated string?
   A) String
   B) &str
   C) char
   D) [u8; 4]
   Correct answer: A
";
