//! Synchronous / asynchronous classification of callables

use must_handle_ast::{Declaration, TypeRef};

/// Module defining the asynchronous primitives
pub const ASYNC_MODULE: &str = "std:async";

pub const FUTURE: &str = "Future";

/// "Either a future or an immediate value"
pub const FUTURE_OR: &str = "FutureOr";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallableKind {
    Synchronous,
    Asynchronous,
}

pub fn classify(decl: &Declaration) -> CallableKind {
    if is_asynchronous(decl) {
        CallableKind::Asynchronous
    } else {
        CallableKind::Synchronous
    }
}

/// A declaration is asynchronous iff its declared result type is future-like.
/// A missing or unresolved result type counts as synchronous.
pub fn is_asynchronous(decl: &Declaration) -> bool {
    decl.return_type.as_ref().is_some_and(is_future_like)
}

pub fn is_future_like(ty: &TypeRef) -> bool {
    match ty.head() {
        Some((name, module)) => module == ASYNC_MODULE && (name == FUTURE || name == FUTURE_OR),
        None => false,
    }
}
