use serde::{Deserialize, Serialize};
use std::{fs, path::Path};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("failed to read stack catalog: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid stack catalog: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StackType {
    Frontend,
    Backend,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StackContent {
    pub title: String,
    pub description: String,
}

/// One tutorial track offered by the chooser, e.g. React + Apollo.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Stack {
    pub title: String,

    /// also the name of the tutorial's content directory
    pub key: String,
    pub author_name: String,
    pub content: StackContent,

    #[serde(rename = "type")]
    pub stack_type: StackType,

    #[serde(default)]
    pub beginners_choice: bool,

    #[serde(default)]
    pub coming_soon: bool,
}

#[derive(Debug, Default)]
pub struct StackCatalog {
    stacks: Vec<Stack>,
}

impl StackCatalog {
    pub fn from_yaml(source: &str) -> Result<Self, CatalogError> {
        Ok(Self {
            stacks: serde_yaml_ng::from_str(source)?,
        })
    }

    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        Self::from_yaml(&fs::read_to_string(path)?)
    }

    pub fn stacks(&self) -> &[Stack] {
        &self.stacks
    }

    pub fn by_type(&self, stack_type: StackType) -> impl Iterator<Item = &Stack> {
        self.stacks.iter().filter(move |s| s.stack_type == stack_type)
    }

    pub fn find(&self, key: &str) -> Option<&Stack> {
        self.stacks.iter().find(|s| s.key == key)
    }

    pub fn beginners_choice(&self) -> Option<&Stack> {
        self.stacks.iter().find(|s| s.beginners_choice)
    }
}
