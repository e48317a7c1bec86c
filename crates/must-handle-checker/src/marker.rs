//! Recognition of the handling-required marker on declarations
//!
//! The marker library exposes the marker twice: as a pre-built constant
//! (`@mustHandle`) and as a constructible type (`@MustHandle()`). Both are
//! accepted as long as they come from the marker library itself.

use must_handle_ast::{Annotation, AnnotationTarget, Declaration};

/// Module identifier prefix of the library defining the marker
pub const MARKER_MODULE_PREFIX: &str = "package:must_handle/";

/// Name of the pre-built marker constant
pub const MARKER_CONSTANT: &str = "mustHandle";

/// Name of the constructible marker type
pub const MARKER_TYPE: &str = "MustHandle";

/// Whether any metadata entry on `decl` is the marker
pub fn has_required_marker(decl: &Declaration) -> bool {
    decl.annotations.iter().any(is_marker)
}

/// Whether one metadata entry is the marker, in either surface form.
/// Unresolved entries never match.
pub fn is_marker(annotation: &Annotation) -> bool {
    match &annotation.target {
        Some(AnnotationTarget::Variable { name, module }) => {
            name == MARKER_CONSTANT && from_marker_library(module)
        }
        Some(AnnotationTarget::Constructor { type_name, module }) => {
            type_name == MARKER_TYPE && from_marker_library(module)
        }
        None => false,
    }
}

// The prefix ends in `/`, so `package:must_handle_extra/...` does not match.
fn from_marker_library(module: &str) -> bool {
    module.starts_with(MARKER_MODULE_PREFIX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use must_handle_ast::DeclKind;

    const LIB: &str = "package:must_handle/markers";

    fn decl_with(annotation: Annotation) -> Declaration {
        Declaration::new("f", DeclKind::Function).annotated(annotation)
    }

    #[test]
    fn constant_form_is_accepted() {
        assert!(has_required_marker(&decl_with(Annotation::variable("mustHandle", LIB))));
    }

    #[test]
    fn constructor_form_is_accepted() {
        assert!(has_required_marker(&decl_with(Annotation::constructor("MustHandle", LIB))));
    }

    #[test]
    fn forms_are_not_interchangeable() {
        assert!(!has_required_marker(&decl_with(Annotation::variable("MustHandle", LIB))));
        assert!(!has_required_marker(&decl_with(Annotation::constructor("mustHandle", LIB))));
    }

    #[test]
    fn same_name_from_another_library_is_rejected() {
        assert!(!has_required_marker(&decl_with(Annotation::variable(
            "mustHandle",
            "package:other/markers"
        ))));
        assert!(!has_required_marker(&decl_with(Annotation::constructor(
            "MustHandle",
            "package:must_handle_extra/markers"
        ))));
    }

    #[test]
    fn unresolved_metadata_is_ignored() {
        assert!(!has_required_marker(&decl_with(Annotation::unresolved())));
    }

    #[test]
    fn any_entry_may_carry_the_marker() {
        let decl = Declaration::new("f", DeclKind::Method)
            .annotated(Annotation::variable("deprecated", "std:core"))
            .annotated(Annotation::unresolved())
            .annotated(Annotation::constructor("MustHandle", LIB));
        assert!(has_required_marker(&decl));
    }

    #[test]
    fn no_metadata_means_no_marker() {
        assert!(!has_required_marker(&Declaration::new("f", DeclKind::Function)));
    }
}
