//! Contact form, joke, and quiz commands.

#![allow(clippy::print_stdout)]

use std::path::Path;

use mini_shop_storefront::contact::{ContactForm, SUBMITTED_MESSAGE};
use mini_shop_storefront::quiz::{QuestionBank, Quiz, QuizView};
use mini_shop_storefront::services::JokeClient;

/// Validate a contact form and print the acknowledgement.
///
/// # Errors
///
/// Returns the validation error if a field is blank or the email is malformed.
pub fn contact(
    name: String,
    email: String,
    message: String,
) -> Result<(), Box<dyn std::error::Error>> {
    let form = ContactForm {
        name,
        email,
        message,
    };
    form.validate()?;
    println!("{SUBMITTED_MESSAGE}");
    Ok(())
}

/// Print a joke, or the fallback line if none could be fetched.
///
/// # Errors
///
/// Returns an error only if the HTTP client cannot be built.
pub async fn joke(url: &str) -> Result<(), Box<dyn std::error::Error>> {
    let client = JokeClient::new(url)?;
    println!("{}", client.joke_or_fallback().await);
    Ok(())
}

/// Run through the quiz with 1-based `answers`, one per question.
///
/// Stops early at the first unanswered question if `answers` runs out.
///
/// # Errors
///
/// Returns an error if the bank cannot be loaded or an answer number is out
/// of range.
pub fn quiz(bank: Option<&Path>, answers: &[usize]) -> Result<(), Box<dyn std::error::Error>> {
    let bank = match bank {
        Some(path) => QuestionBank::from_path(path)?,
        None => QuestionBank::builtin(),
    };
    let mut quiz = Quiz::new(bank);
    let mut answers = answers.iter();

    while let QuizView::Question {
        number,
        total,
        prompt,
        answers: choices,
        ..
    } = quiz.view()
    {
        println!("Q{number}/{total}: {prompt}");
        for (i, choice) in choices.iter().enumerate() {
            println!("  {}. {choice}", i + 1);
        }

        let Some(&answer) = answers.next() else {
            println!("(no answer given, stopping)");
            break;
        };
        let index = answer.checked_sub(1).ok_or("answers are numbered from 1")?;
        let outcome = quiz.select_answer(index)?;
        let correct = choices
            .get(outcome.correct_index)
            .map_or("?", String::as_str);
        if outcome.correct {
            println!("Correct!");
        } else {
            println!("Wrong. The answer was: {correct}");
        }
        quiz.next()?;
    }

    if let QuizView::Score { score, total } = quiz.view() {
        println!("You scored {score} out of {total}!");
    }
    Ok(())
}
