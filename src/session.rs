use std::{
    io::{BufRead, Write},
    path::PathBuf,
};

use anyhow::Context;

use crate::{
    content::{Chapter, ChapterQuiz, Tutorial},
    quiz::{
        progress, QuizProgressStore, QuizView, QuizViewInput, ANSWER_COUNT, UNLOCKED_MESSAGE,
        UNLOCK_TITLE,
    },
};

const BOLD: &str = "\x1b[1m";
const RESET: &str = "\x1b[0m";
const HELP: &str = "answer with 1-4, 's' to skip, 'r' to toggle remembering skips, 'q' to quit";

#[derive(Debug, PartialEq, Eq)]
pub enum SessionEnd {
    /// every chapter was unlocked
    Finished,
    Quit,
    /// input ran out before the tutorial was done
    Exhausted,
}

enum ChapterEnd {
    Unlocked,
    Quit,
    Exhausted,
}

/// Walks a tutorial chapter by chapter, asking each quiz on `output` and reading commands from `input`.
pub struct Session<'a, R, W> {
    store: &'a mut QuizProgressStore,
    tutorial: &'a Tutorial,
    progress_file: Option<PathBuf>,
    show_bonus: bool,
    input: R,
    output: W,
}

impl<'a, R: BufRead, W: Write> Session<'a, R, W> {
    pub fn new(store: &'a mut QuizProgressStore, tutorial: &'a Tutorial, input: R, output: W) -> Self {
        Self {
            store,
            tutorial,
            progress_file: None,
            show_bonus: false,
            input,
            output,
        }
    }

    pub fn with_progress_file(mut self, path: PathBuf) -> Self {
        self.progress_file = Some(path);
        self
    }

    /// Offer the bonus chapter next to the regular next chapter.
    pub fn with_bonus(mut self, show_bonus: bool) -> Self {
        self.show_bonus = show_bonus;
        self
    }

    pub fn run(mut self) -> anyhow::Result<SessionEnd> {
        let tutorial = self.tutorial;
        for (index, chapter) in tutorial.chapters.iter().enumerate() {
            let n = index + 1;
            writeln!(self.output, "\n{BOLD}{}. {}{RESET}", n, chapter.title())?;

            if self.store.is_unlocked(&chapter.slug) {
                writeln!(self.output, "already unlocked")?;
                continue;
            }

            let Some(quiz) = chapter.quiz.as_ref() else {
                writeln!(self.output, "no quiz in this chapter")?;
                continue;
            };

            match self.ask(n, chapter, quiz)? {
                ChapterEnd::Unlocked => self.render(n, chapter)?,
                ChapterEnd::Quit => return Ok(SessionEnd::Quit),
                ChapterEnd::Exhausted => return Ok(SessionEnd::Exhausted),
            }
        }

        writeln!(self.output, "\nall chapters of '{}' are unlocked", tutorial.key)?;
        Ok(SessionEnd::Finished)
    }

    fn ask(&mut self, n: usize, chapter: &Chapter, quiz: &ChapterQuiz) -> anyhow::Result<ChapterEnd> {
        self.render(n, chapter)?;
        writeln!(self.output, "{HELP}")?;
        let offers_answers = quiz.answers.len() == ANSWER_COUNT;

        while let Some(line) = self.read_line()? {
            match line.as_str() {
                "q" => return Ok(ChapterEnd::Quit),
                "s" => {
                    self.store.skip(&chapter.slug);
                    self.persist()?;
                    if !self.store.remember_skipped() {
                        writeln!(self.output, "remember this decision? [y/N]")?;
                        if let Some(answer) = self.read_line()? {
                            if answer.eq_ignore_ascii_case("y") {
                                self.store.set_remember_skipped(true);
                                self.persist()?;
                            }
                        }
                    }
                    return Ok(ChapterEnd::Unlocked);
                }
                "r" => {
                    self.store.toggle_remember_skipped();
                    self.persist()?;
                    writeln!(
                        self.output,
                        "remember skipped: {}",
                        self.store.remember_skipped()
                    )?;
                }
                choice => match choice.parse::<usize>() {
                    Ok(answer) if offers_answers && (1..=ANSWER_COUNT).contains(&answer) => {
                        let correct = self.store.select_answer(
                            &chapter.slug,
                            answer - 1,
                            quiz.correct_answer_index,
                        );
                        self.persist()?;
                        if correct {
                            return Ok(ChapterEnd::Unlocked);
                        }
                        writeln!(self.output, "not quite, try again")?;
                    }
                    _ => writeln!(self.output, "{HELP}")?,
                },
            }
        }

        Ok(ChapterEnd::Exhausted)
    }

    fn render(&mut self, n: usize, chapter: &Chapter) -> anyhow::Result<()> {
        let next = self.tutorial.next_chapter(&chapter.slug).map(Chapter::step);
        let view = QuizView::new(QuizViewInput {
            quiz: chapter.quiz.as_ref(),
            reaction: self.store.reaction(&chapter.slug),
            remember_skipped: self.store.remember_skipped(),
            n,
            show_bonus: self.show_bonus && next.is_none(),
            next_chapter: next.as_ref(),
        });

        if let Some(question) = view.question {
            if !view.show_next_chapter {
                writeln!(self.output, "-- {UNLOCK_TITLE} --")?;
                writeln!(self.output, "{question}")?;
                for answer in &view.answers {
                    let mark = if answer.checked { "x" } else { " " };
                    writeln!(self.output, "  [{mark}] {}. {}", answer.index + 1, answer.text)?;
                }
            }
        }

        if view.show_unlocked {
            writeln!(self.output, "{UNLOCKED_MESSAGE}")?;
        }
        for link in &view.next_chapters {
            let label = if link.is_bonus { "bonus" } else { "next" };
            writeln!(self.output, "{label}: {} ({})", link.step.title, link.step.link)?;
        }
        if let Some(remember) = view.remember_decision {
            let mark = if remember { "x" } else { " " };
            writeln!(self.output, "[{mark}] remember my decision to skip")?;
        }
        Ok(())
    }

    fn read_line(&mut self) -> anyhow::Result<Option<String>> {
        let mut line = String::new();
        let read = self
            .input
            .read_line(&mut line)
            .context("failed to read input")?;
        Ok((read > 0).then(|| line.trim().to_string()))
    }

    fn persist(&self) -> anyhow::Result<()> {
        if let Some(path) = &self.progress_file {
            progress::save(path, self.store.state())
                .context(format!("failed to save progress to {}", path.display()))?;
        }
        Ok(())
    }
}
