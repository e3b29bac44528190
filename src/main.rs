use std::{
    env, io,
    path::{Path, PathBuf},
};

use anyhow::Context;
use tutorials::{
    content::{load_tutorial, StackCatalog},
    quiz::{progress, QuizProgressStore},
    session::{Session, SessionEnd},
};

const BOLD: &str = "\x1b[1m";
const RESET: &str = "\x1b[0m";
const PROGRESS_ENV: &str = "TUTORIALS_PROGRESS_FILE";
const STACKS_FILE: &str = "stacks.yaml";
// the fundamentals track ends with a detour into the advanced clients chapter
const BONUS_TUTORIAL: &str = "graphql/basics";

#[derive(Debug, PartialEq, Eq)]
pub struct Config {
    pub content_root: PathBuf,
    pub tutorial_dir: String,
    pub progress_file: Option<PathBuf>,
}

fn parse_config(
    mut args: impl Iterator<Item = String>,
    progress_env: Option<String>,
) -> anyhow::Result<Config> {
    let content_root = args.next().context("content_root is required")?;
    let tutorial_dir = args
        .next()
        .context("tutorial_dir is required, e.g. 'graphql/basics' or 'react-apollo'")?;
    let progress_file = args.next().or(progress_env).map(PathBuf::from);

    Ok(Config {
        content_root: PathBuf::from(content_root),
        tutorial_dir: tutorial_dir.trim_matches('/').to_string(),
        progress_file,
    })
}

fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt().with_writer(io::stderr).init();

    let config = match parse_config(env::args().skip(1), env::var(PROGRESS_ENV).ok()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Usage: tutorials <content_root> <tutorial_dir> [progress_file]");
            return Err(e);
        }
    };

    let tutorial = load_tutorial(&config.content_root, &config.tutorial_dir).context(format!(
        "failed to load tutorial '{}' from {}",
        config.tutorial_dir,
        config.content_root.display()
    ))?;

    print_stack(&config.content_root, &config.tutorial_dir)?;

    let state = match &config.progress_file {
        Some(path) => progress::load(path).context("failed to restore progress")?,
        None => Default::default(),
    };
    let mut store = QuizProgressStore::with_state(state);

    let stdin = io::stdin();
    let mut session = Session::new(&mut store, &tutorial, stdin.lock(), io::stdout())
        .with_bonus(config.tutorial_dir == BONUS_TUTORIAL);
    if let Some(path) = &config.progress_file {
        session = session.with_progress_file(path.clone());
    }

    let end = session.run()?;
    tracing::info!(?end, tutorial = %tutorial.key, "session ended");

    let unlocked = tutorial
        .chapters
        .iter()
        .filter(|c| store.is_unlocked(&c.slug))
        .count();
    println!(
        "unlocked {BOLD}{}{RESET} of {BOLD}{}{RESET} chapters",
        unlocked,
        tutorial.chapters.len()
    );

    if end == SessionEnd::Exhausted && config.progress_file.is_none() {
        println!("progress is not saved, pass a progress file or set {PROGRESS_ENV}");
    }

    Ok(())
}

fn print_stack(content_root: &Path, tutorial_dir: &str) -> anyhow::Result<()> {
    let path = content_root.join(STACKS_FILE);
    if !path.is_file() {
        return Ok(());
    }

    let catalog = StackCatalog::load(&path).context("failed to load stack catalog")?;
    let key = tutorial_dir.rsplit('/').next().unwrap_or(tutorial_dir);
    match catalog.find(key) {
        Some(stack) => {
            println!("{BOLD}{}{RESET} by {}", stack.content.title, stack.author_name);
            println!("{}", stack.content.description);
        }
        None => tracing::debug!(key, "tutorial has no stack entry"),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> impl Iterator<Item = String> {
        list.iter().map(|s| s.to_string()).collect::<Vec<_>>().into_iter()
    }

    #[test]
    fn progress_file_from_args_wins_over_env() {
        let config = parse_config(
            args(&["content", "/graphql/basics/", "me.json"]),
            Some(String::from("env.json")),
        )
        .unwrap();

        assert_eq!(config.tutorial_dir, "graphql/basics");
        assert_eq!(config.progress_file, Some(PathBuf::from("me.json")));
    }

    #[test]
    fn progress_file_falls_back_to_env() {
        let config = parse_config(args(&["content", "react-apollo"]), Some(String::from("env.json"))).unwrap();
        assert_eq!(config.progress_file, Some(PathBuf::from("env.json")));

        let config = parse_config(args(&["content", "react-apollo"]), None).unwrap();
        assert_eq!(config.progress_file, None);
    }

    #[test]
    fn tutorial_dir_is_required() {
        assert!(parse_config(args(&["content"]), None).is_err());
    }
}
