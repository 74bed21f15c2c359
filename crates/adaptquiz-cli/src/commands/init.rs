//! The `adaptquiz init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    // Create adaptquiz.toml
    if std::path::Path::new("adaptquiz.toml").exists() {
        println!("adaptquiz.toml already exists, skipping.");
    } else {
        std::fs::write("adaptquiz.toml", SAMPLE_CONFIG)?;
        println!("Created adaptquiz.toml");
    }

    // Create example question set
    std::fs::create_dir_all("question-sets")?;
    let example_path = std::path::Path::new("question-sets/example.toml");
    if example_path.exists() {
        println!("question-sets/example.toml already exists, skipping.");
    } else {
        std::fs::write(example_path, EXAMPLE_QUESTION_SET)?;
        println!("Created question-sets/example.toml");
    }

    println!("\nNext steps:");
    println!("  1. Edit adaptquiz.toml to set your name");
    println!("  2. Run: adaptquiz validate --questions question-sets/example.toml");
    println!("  3. Run: adaptquiz play");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# adaptquiz configuration

username = "player"
default_question_set = "question-sets/example.toml"
rounds = 1
format = "text"
"#;

const EXAMPLE_QUESTION_SET: &str = r#"[question_set]
id = "example"
name = "Example Question Set"
description = "A few questions per difficulty to get started"

[[questions]]
question = "How many legs does a spider have?"
choices = ["Six", "Eight", "Ten", "Twelve"]
correct_answer = "Eight"
difficulty = "easy"

[[questions]]
question = "What color do you get by mixing blue and yellow?"
choices = ["Green", "Purple", "Orange", "Brown"]
correct_answer = "Green"
difficulty = "easy"

[[questions]]
question = "Which planet is known as the Red Planet?"
choices = ["Venus", "Jupiter", "Mars", "Saturn"]
correct_answer = "Mars"
difficulty = "medium"

[[questions]]
question = "In which year did the Berlin Wall fall?"
choices = ["1987", "1989", "1991", "1993"]
correct_answer = "1989"
difficulty = "hard"
"#;
