use regex::Regex;
use std::{
    fs, io,
    path::{Path, PathBuf},
    sync::OnceLock,
};
use thiserror::Error;

use super::{
    chapter::{Chapter, ChapterQuiz, Tutorial},
    frontmatter::{ChapterFrontmatter, Heading},
};

#[derive(Error, Debug)]
pub enum ContentError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("chapter '{slug}' has no frontmatter")]
    MissingFrontmatter { slug: String },

    #[error("chapter '{slug}' has an unterminated frontmatter block")]
    UnterminatedFrontmatter { slug: String },

    #[error("invalid frontmatter in chapter '{slug}': {source}")]
    Frontmatter {
        slug: String,
        #[source]
        source: serde_yaml_ng::Error,
    },

    #[error("no chapters found in {path}")]
    NoChapters { path: PathBuf },
}

fn frontmatter_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?s)\A---[ \t]*\r?\n(.*?)(?m:^)---[ \t]*\r?(?:\n|\z)").unwrap())
}

fn heading_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?m)^### (.+?)\r?$").unwrap())
}

pub fn parse_chapter(slug: &str, source: &str) -> Result<Chapter, ContentError> {
    if !source.starts_with("---") {
        return Err(ContentError::MissingFrontmatter {
            slug: slug.to_string(),
        });
    }

    let captures = frontmatter_regex()
        .captures(source)
        .ok_or_else(|| ContentError::UnterminatedFrontmatter {
            slug: slug.to_string(),
        })?;

    let yaml = captures.get(1).map_or("", |m| m.as_str());
    let body_start = captures.get(0).map_or(0, |m| m.end());

    let frontmatter: ChapterFrontmatter =
        serde_yaml_ng::from_str(yaml).map_err(|source| ContentError::Frontmatter {
            slug: slug.to_string(),
            source,
        })?;

    let mut headings = Vec::new();
    let body = transform_content(source[body_start..].trim_start_matches(['\r', '\n']), &mut headings);
    let quiz = ChapterQuiz::from_frontmatter(&frontmatter);

    Ok(Chapter {
        slug: slug.to_string(),
        frontmatter,
        body,
        headings,
        quiz,
    })
}

// add ids to h3 headings, h2 and lower levels stay out of the page toc
fn transform_content(content: &str, headings: &mut Vec<Heading>) -> String {
    let mut slugger = github_slugger::Slugger::default();

    heading_regex()
        .replace_all(content, |caps: &regex::Captures| {
            let heading_title = caps[1].trim_end();
            let id = slugger.slug(heading_title);
            headings.push(Heading {
                slug: id.clone(),
                title: heading_title.to_string(),
                level: 3,
            });
            format!("### {} {{#{}}}", heading_title, id)
        })
        .to_string()
}

/// `/graphql/basics/1-core-concepts/` for `<root>/graphql/basics/1-core-concepts.md`.
pub fn chapter_slug(root: &Path, file: &Path) -> String {
    let relative = file.strip_prefix(root).unwrap_or(file).with_extension("");
    let parts: Vec<String> = relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect();
    format!("/{}/", parts.join("/"))
}

// "10-summary" sorts after "2-mutations"
fn reading_order(path: &Path) -> (u64, String) {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let number = name
        .split(|c: char| !c.is_ascii_digit())
        .next()
        .and_then(|n| n.parse().ok())
        .unwrap_or(u64::MAX);
    (number, name)
}

pub fn load_chapter(root: &Path, file: &Path) -> Result<Chapter, ContentError> {
    let slug = chapter_slug(root, file);
    let source = fs::read_to_string(file).map_err(|source| ContentError::Io {
        path: file.to_path_buf(),
        source,
    })?;
    parse_chapter(&slug, &source)
}

/// Reads every `*.md` directly inside `root/dir`.
pub fn load_tutorial(root: &Path, dir: &str) -> Result<Tutorial, ContentError> {
    let path = root.join(dir);
    let io_err = |source| ContentError::Io {
        path: path.clone(),
        source,
    };

    let mut files = Vec::new();
    for entry in fs::read_dir(&path).map_err(io_err)? {
        let file = entry.map_err(io_err)?.path();
        if file.is_file() && file.extension().is_some_and(|ext| ext == "md") {
            files.push(file);
        }
    }

    if files.is_empty() {
        return Err(ContentError::NoChapters { path });
    }
    files.sort_by_key(|f| reading_order(f));

    let chapters = files
        .iter()
        .map(|file| load_chapter(root, file))
        .collect::<Result<Vec<Chapter>, ContentError>>()?;

    tracing::info!(tutorial = dir, chapters = chapters.len(), "loaded tutorial");

    Ok(Tutorial {
        key: dir.to_string(),
        chapters,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const CHAPTER: &str = r#"---
title: Core Concepts
description: Learn about the SDL
question: Which keyword defines a new type?
answers: ["type", "schema", "query", "field"]
correctAnswer: 0
---

## Overview {#overview}

### The Schema Definition Language
Text.

### Adding a Relation
More.

### Adding a Relation
Again.
"#;

    #[test]
    fn parses_frontmatter_and_quiz() {
        let chapter = parse_chapter("/graphql/basics/1-core-concepts/", CHAPTER).unwrap();

        assert_eq!(chapter.title(), "Core Concepts");
        assert_eq!(chapter.link(), "/tutorials/graphql/basics/1-core-concepts/");

        let quiz = chapter.quiz.unwrap();
        assert_eq!(quiz.question, "Which keyword defines a new type?");
        assert_eq!(quiz.answers.len(), 4);
        assert_eq!(quiz.correct_answer_index, Some(0));
        assert!(chapter.body.starts_with("## Overview"));
    }

    #[test]
    fn h3_headings_get_unique_ids() {
        let chapter = parse_chapter("/x/", CHAPTER).unwrap();
        let slugs: Vec<&str> = chapter.headings.iter().map(|h| h.slug.as_str()).collect();

        assert_eq!(
            slugs,
            vec!["the-schema-definition-language", "adding-a-relation", "adding-a-relation-1"]
        );
        assert!(chapter
            .body
            .contains("### The Schema Definition Language {#the-schema-definition-language}"));
    }

    #[test]
    fn frontmatter_errors() {
        assert!(matches!(
            parse_chapter("/a/", "# no frontmatter"),
            Err(ContentError::MissingFrontmatter { .. })
        ));
        assert!(matches!(
            parse_chapter("/a/", "---\ntitle: Open\n\nbody"),
            Err(ContentError::UnterminatedFrontmatter { .. })
        ));
        assert!(matches!(
            parse_chapter("/a/", "---\ndescription: no title\n---\nbody"),
            Err(ContentError::Frontmatter { .. })
        ));
    }

    #[test]
    fn chapter_without_question_has_no_quiz() {
        let chapter = parse_chapter("/a/", "---\ntitle: Intro\n---\nHello").unwrap();
        assert!(chapter.quiz.is_none());
        assert_eq!(chapter.body, "Hello");
    }

    #[test]
    fn slug_from_path() {
        let root = Path::new("/content");
        assert_eq!(
            chapter_slug(root, Path::new("/content/graphql/basics/1-core-concepts.md")),
            "/graphql/basics/1-core-concepts/"
        );
    }

    #[test]
    fn numeric_prefixes_sort_numerically() {
        let mut files = vec![
            PathBuf::from("10-summary.md"),
            PathBuf::from("2-queries.md"),
            PathBuf::from("0-introduction.md"),
        ];
        files.sort_by_key(|f| reading_order(f));
        assert_eq!(files[0], PathBuf::from("0-introduction.md"));
        assert_eq!(files[2], PathBuf::from("10-summary.md"));
    }
}
