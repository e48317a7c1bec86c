//! Resolved static types attached to declarations

use serde::{Deserialize, Serialize};

/// A fully resolved static type, as computed by the host front end
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TypeRef {
    /// Nominal type: `Future<int>`, `String`, `List<User>?`
    Interface {
        name: String,
        /// Identifier of the module that declares the type constructor
        module: String,
        #[serde(default)]
        args: Vec<TypeRef>,
        #[serde(default)]
        nullable: bool,
    },

    /// Function type: `int Function(String)`
    Function {
        #[serde(default)]
        params: Vec<TypeRef>,
        ret: Box<TypeRef>,
    },

    Dynamic,
    Void,
    Never,

    /// The front end could not resolve the type
    Unknown,
}

impl TypeRef {
    pub fn interface(name: impl Into<String>, module: impl Into<String>) -> Self {
        TypeRef::Interface {
            name: name.into(),
            module: module.into(),
            args: vec![],
            nullable: false,
        }
    }

    /// Add a type argument (only meaningful for interface types)
    pub fn with_arg(mut self, arg: TypeRef) -> Self {
        if let TypeRef::Interface { args, .. } = &mut self {
            args.push(arg);
        }
        self
    }

    pub fn nullable(mut self) -> Self {
        if let TypeRef::Interface { nullable, .. } = &mut self {
            *nullable = true;
        }
        self
    }

    /// Head type constructor name and its defining module, if nominal
    pub fn head(&self) -> Option<(&str, &str)> {
        match self {
            TypeRef::Interface { name, module, .. } => Some((name.as_str(), module.as_str())),
            _ => None,
        }
    }

    pub fn display(&self) -> String {
        match self {
            TypeRef::Interface { name, args, nullable, .. } => {
                let mut out = name.clone();
                if !args.is_empty() {
                    out.push('<');
                    out.push_str(
                        &args.iter().map(|t| t.display()).collect::<Vec<_>>().join(", "),
                    );
                    out.push('>');
                }
                if *nullable {
                    out.push('?');
                }
                out
            }
            TypeRef::Function { params, ret } => format!(
                "{} Function({})",
                ret.display(),
                params.iter().map(|t| t.display()).collect::<Vec<_>>().join(", ")
            ),
            TypeRef::Dynamic => "dynamic".to_string(),
            TypeRef::Void => "void".to_string(),
            TypeRef::Never => "Never".to_string(),
            TypeRef::Unknown => "?".to_string(),
        }
    }
}
