mod chapter;
mod frontmatter;
mod load;
pub mod stack;

pub use chapter::{extract_steps, next_chapter, Chapter, ChapterQuiz, Step, Tutorial, TUTORIALS_PREFIX};
pub use frontmatter::{ChapterFrontmatter, Heading};
pub use load::{chapter_slug, load_chapter, load_tutorial, parse_chapter, ContentError};
pub use stack::{CatalogError, Stack, StackCatalog, StackType};
