use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};

use hanzi_reader::flashcards::format_due;

use crate::app::App;
use crate::render::terminal::{paint, render_saved_word, Color};

enum Answer {
    Correct,
    Incorrect,
    Quit,
}

fn prompt(input: &mut impl BufRead, message: &str) -> Result<Option<String>> {
    print!("{}", message);
    io::stdout().flush()?;

    let mut line = String::new();
    let read = input.read_line(&mut line).context("Failed to read answer")?;
    if read == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_lowercase()))
}

fn ask_answer(input: &mut impl BufRead) -> Result<Answer> {
    loop {
        match prompt(input, "Did you know it? [y/n/q] ")?.as_deref() {
            None | Some("q") => return Ok(Answer::Quit),
            Some("y") | Some("yes") => return Ok(Answer::Correct),
            Some("n") | Some("no") => return Ok(Answer::Incorrect),
            Some(_) => continue,
        }
    }
}

/// Interactive review: show the word, Enter reveals it, then y/n records the answer
pub fn run(app: &App, limit: usize, use_color: bool) -> Result<()> {
    let Some(mut session) = app.reader.start_review(limit)? else {
        println!("No saved words to review. Use 'hanzi save <word>' to add some.");
        return Ok(());
    };

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut correct = 0;
    let mut answered = 0;

    while let Some((card, total)) = session.position() {
        let word = match session.current_word() {
            Some(w) => w.word.clone(),
            None => break,
        };

        println!();
        println!("{}", paint(&format!("Card {} of {}", card, total), Color::DIM, use_color));
        println!("{}", paint(&word, Color::BOLD, use_color));

        if prompt(&mut input, "Press Enter to reveal (q to quit) ")?.as_deref() == Some("q") {
            break;
        }

        let revealed = app.reader.reveal_current(Some(&session), &word)?;
        println!("{}", render_saved_word(revealed, use_color));

        let known = match ask_answer(&mut input)? {
            Answer::Quit => break,
            Answer::Correct => true,
            Answer::Incorrect => false,
        };

        app.reader.answer_current(Some(&mut session), &word, known)?;
        answered += 1;
        if known {
            correct += 1;
        }

        if let Some(stats) = app.reader.stats_for(&word)? {
            let next = format_due(stats.next_review, app.reader.now());
            let label = if known {
                paint("Correct", Color::GREEN, use_color)
            } else {
                paint("Again", Color::RED, use_color)
            };
            println!("{}, next review {}", label, next);
        }
    }

    println!();
    if session.is_complete() {
        println!("Session complete: {} of {} correct", correct, answered);
    } else {
        println!("Session ended: {} of {} correct", correct, answered);
    }
    app.reader.end_review(session);

    Ok(())
}
