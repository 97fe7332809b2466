//! The interactive study flow: collect the two inputs, then ask for a study
//! suggestion and related vocabulary and print both.

use crate::console;
use anyhow::Result;
use lingo_core::session::AssistantSession;
use std::io::{BufRead, Write};

pub const NOTES_PROMPT: &str = "오늘 배운 내용을 입력하세요: ";
pub const WORD_PROMPT: &str = "학습하고 싶은 중요한 단어를 입력하세요: ";
pub const SUGGESTION_HEADER: &str = "다음 학습할 내용:";
pub const VOCABULARY_HEADER: &str = "추가 학습할 단어:";

/// Runs one study round against `session`.
///
/// Inputs given as `Some` skip their prompt. A malformed suggestion reply
/// ends the round before the vocabulary request is made.
pub async fn run_study<R: BufRead, W: Write>(
    session: &mut AssistantSession,
    notes: Option<String>,
    word: Option<String>,
    input: &mut R,
    output: &mut W,
) -> Result<()> {
    let notes = match notes {
        Some(notes) => notes,
        None => console::prompt_line(input, output, NOTES_PROMPT)?,
    };
    let word = match word {
        Some(word) => word,
        None => console::prompt_line(input, output, WORD_PROMPT)?,
    };

    let suggestion = session.request_learning_suggestion(&notes).await?;
    console::print_outcome(output, SUGGESTION_HEADER, suggestion)?;

    let vocabulary = session.request_related_vocabulary(&word).await?;
    console::print_outcome(output, VOCABULARY_HEADER, vocabulary)?;
    Ok(())
}
