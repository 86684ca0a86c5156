//! Shared node types for integration tests.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use fstree::{Builder, Node, TryBuilder};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct TestNode {
    pub name: String,
    pub children: Vec<TestNode>,
    pub annotations: Vec<TestAnnotation>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TestAnnotation {
    pub key: String,
    pub value: String,
}

impl TestNode {
    pub fn named(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Self::default()
        }
    }

    pub fn child_names(&self) -> Vec<&str> {
        self.children.iter().map(|c| c.name.as_str()).collect()
    }
}

impl TestAnnotation {
    pub fn new(key: &str, value: &str) -> Self {
        Self {
            key: key.to_string(),
            value: value.to_string(),
        }
    }
}

impl Node<TestAnnotation> for TestNode {
    fn append(&mut self, child: Self) {
        self.children.push(child);
    }

    fn annotate(&mut self, annotation: TestAnnotation) {
        self.annotations.push(annotation);
    }
}

pub type TestBuilder = Builder<str, TestNode, TestAnnotation>;
pub type TestTryBuilder = TryBuilder<str, TestNode, TestAnnotation, OutlineError>;

/// Builder that ignores its context and yields a node called `name`.
pub fn named(name: &'static str) -> TestBuilder {
    TestBuilder::new(move |_| TestNode::named(name))
}

/// Builder that names its node after the build context.
pub fn echo() -> TestBuilder {
    TestBuilder::new(TestNode::named)
}

/// Node that records every mutation into a log shared with the caller, so
/// the state of a parent stays observable after a failed build drops it.
#[derive(Debug, Clone)]
pub struct SharedNode {
    pub name: String,
    pub log: Arc<Mutex<Vec<String>>>,
}

impl SharedNode {
    pub fn with_log(name: &str, log: &Arc<Mutex<Vec<String>>>) -> Self {
        Self {
            name: name.to_string(),
            log: Arc::clone(log),
        }
    }

    pub fn named(name: &str) -> Self {
        Self::with_log(name, &Arc::default())
    }
}

impl Node<String> for SharedNode {
    fn append(&mut self, child: Self) {
        self.log.lock().unwrap().push(format!("child:{}", child.name));
    }

    fn annotate(&mut self, annotation: String) {
        self.log.lock().unwrap().push(format!("note:{}", annotation));
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum OutlineError {
    #[error("section not found: {0}")]
    MissingSection(String),

    #[error("invalid context: {0}")]
    InvalidContext(String),
}
