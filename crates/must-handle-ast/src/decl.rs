//! Resolved declarations (the targets of call expressions)

use serde::{Deserialize, Serialize};
use crate::TypeRef;

/// Handle of a declaration inside a [`crate::SyntaxTree`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DeclId(pub u32);

/// A named, resolvable program entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Declaration {
    pub name: String,
    pub kind: DeclKind,
    /// Identifier of the module the declaration lives in
    #[serde(default)]
    pub module: String,
    /// Declared result type; `None` when the front end could not resolve it
    #[serde(default)]
    pub return_type: Option<TypeRef>,
    /// Metadata entries in source order
    #[serde(default)]
    pub annotations: Vec<Annotation>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeclKind {
    Function,
    Method,
    Getter,
    Constructor,
    LocalFunction,
}

/// One metadata entry attached to a declaration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Annotation {
    /// What the annotation resolved to; `None` if unresolved
    #[serde(default)]
    pub target: Option<AnnotationTarget>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AnnotationTarget {
    /// `@someConstant`: a read of a top-level constant
    Variable { name: String, module: String },
    /// `@SomeType()`: a constant constructor invocation
    Constructor { type_name: String, module: String },
}

impl Annotation {
    pub fn variable(name: impl Into<String>, module: impl Into<String>) -> Self {
        Self {
            target: Some(AnnotationTarget::Variable {
                name: name.into(),
                module: module.into(),
            }),
        }
    }

    pub fn constructor(type_name: impl Into<String>, module: impl Into<String>) -> Self {
        Self {
            target: Some(AnnotationTarget::Constructor {
                type_name: type_name.into(),
                module: module.into(),
            }),
        }
    }

    pub fn unresolved() -> Self {
        Self { target: None }
    }
}

impl Declaration {
    pub fn new(name: impl Into<String>, kind: DeclKind) -> Self {
        Self {
            name: name.into(),
            kind,
            module: String::new(),
            return_type: None,
            annotations: vec![],
        }
    }

    pub fn returning(mut self, ty: TypeRef) -> Self {
        self.return_type = Some(ty);
        self
    }

    pub fn annotated(mut self, annotation: Annotation) -> Self {
        self.annotations.push(annotation);
        self
    }
}
