//! Block registry
//!
//!     Structural blocks are declared as plain data ([`BlockDef`]): a name, a pattern program and,
//!     optionally, the regular expression the program is expected to compile to. Declaring a
//!     block does nothing; [`Registry::compile_all`] compiles every definition in one explicit
//!     step at startup and refuses to proceed if any of them fails.
//!
//!     After that the registry is immutable. Matching never compiles, so a registry built once
//!     can be shared by reference across threads.
//!
//!     Registration order is priority order: at any position the block declared first gets
//!     the first chance to match.

use std::collections::HashSet;

use tracing::debug;

use crate::tagblock::error::RegistryError;
use crate::tagblock::pattern::{compile, PatternNode};

/// Front block: an opening fence, any mix of fields (with continuation lines) and slugs
/// (with one or more values), and a closing fence.
pub const FRONT_BLOCK: &str = "\
break0
*
  |
    field
      *
        |
          indent
          ndent
    slug
      +
        value
break1";

/// What [`FRONT_BLOCK`] must compile to
pub const FRONT_BLOCK_REGEXP: &str = r"\{((f((i|n))*|s(v)+))*\}";

/// The standard blocks, in priority order
pub const STANDARD_BLOCKS: &[BlockDef<'static>] = &[
    BlockDef {
        name: "front",
        program: FRONT_BLOCK,
        expected_regexp: Some(FRONT_BLOCK_REGEXP),
    },
    BlockDef {
        name: "heading",
        program: "heading",
        expected_regexp: Some("h"),
    },
    BlockDef {
        name: "rule",
        program: "rule",
        expected_regexp: Some("r"),
    },
    BlockDef {
        name: "definition",
        program: "field|slug,*indent|ndent|value",
        expected_regexp: Some("(f|s)((i|n|v))*"),
    },
    BlockDef {
        name: "list",
        program: "value,*value|indent",
        expected_regexp: Some("v((v|i))*"),
    },
    BlockDef {
        name: "paragraph",
        program: "paragraph,*paragraph|indent|ndent",
        expected_regexp: Some("p((p|i|n))*"),
    },
    BlockDef {
        name: "blank",
        program: "+blank",
        expected_regexp: Some("(_)+"),
    },
];

/// Declaration of a structural block
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockDef<'a> {
    pub name: &'a str,
    pub program: &'a str,
    /// When present, the compiled `regexp` must equal this exactly
    pub expected_regexp: Option<&'a str>,
}

/// A block whose pattern compiled and passed the self-check
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledBlock {
    name: String,
    node: PatternNode,
    regexp: String,
}

impl CompiledBlock {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn node(&self) -> &PatternNode {
        &self.node
    }

    pub fn regexp(&self) -> &str {
        &self.regexp
    }
}

/// Compiled blocks in priority order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registry {
    blocks: Vec<CompiledBlock>,
}

impl Registry {
    /// Compile every definition and run the self-check.
    ///
    /// Fails on the first definition that does not compile, renders an invalid regular
    /// expression, or renders something other than its `expected_regexp`.
    pub fn compile_all(defs: &[BlockDef<'_>]) -> Result<Self, RegistryError> {
        let mut seen = HashSet::new();
        let mut blocks = Vec::with_capacity(defs.len());

        for def in defs {
            if !seen.insert(def.name) {
                return Err(RegistryError::Duplicate(def.name.to_string()));
            }

            let node = compile(def.program).map_err(|source| RegistryError::Compile {
                name: def.name.to_string(),
                source,
            })?;
            let regexp = node.regexp();

            if let Some(expected) = def.expected_regexp {
                if expected != regexp {
                    return Err(RegistryError::SelfCheck {
                        name: def.name.to_string(),
                        expected: expected.to_string(),
                        actual: regexp,
                    });
                }
            }
            node.to_regex().map_err(|e| RegistryError::InvalidRegexp {
                name: def.name.to_string(),
                message: e.to_string(),
            })?;

            debug!(block = def.name, %regexp, "registered block");
            blocks.push(CompiledBlock {
                name: def.name.to_string(),
                node,
                regexp,
            });
        }

        Ok(Registry { blocks })
    }

    /// The standard block set
    pub fn standard() -> Result<Self, RegistryError> {
        Registry::compile_all(STANDARD_BLOCKS)
    }

    pub fn get(&self, name: &str) -> Option<&CompiledBlock> {
        self.blocks.iter().find(|b| b.name == name)
    }

    pub fn blocks(&self) -> &[CompiledBlock] {
        &self.blocks
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tagblock::error::CompileError;

    #[test]
    fn test_standard_registry_passes_self_check() {
        let registry = Registry::standard().expect("standard blocks to compile");
        assert_eq!(registry.len(), STANDARD_BLOCKS.len());
        assert_eq!(registry.get("front").unwrap().regexp(), FRONT_BLOCK_REGEXP);
        assert!(registry.get("missing").is_none());
    }

    #[test]
    fn test_registration_order_is_kept() {
        let registry = Registry::standard().unwrap();
        let names: Vec<&str> = registry.blocks().iter().map(|b| b.name()).collect();
        let declared: Vec<&str> = STANDARD_BLOCKS.iter().map(|d| d.name).collect();
        assert_eq!(names, declared);
    }

    #[test]
    fn test_self_check_mismatch_is_fatal() {
        let defs = [BlockDef {
            name: "heading",
            program: "heading",
            expected_regexp: Some("hh"),
        }];
        assert_eq!(
            Registry::compile_all(&defs),
            Err(RegistryError::SelfCheck {
                name: "heading".into(),
                expected: "hh".into(),
                actual: "h".into(),
            })
        );
    }

    #[test]
    fn test_compile_failure_is_fatal() {
        let defs = [
            BlockDef {
                name: "ok",
                program: "heading",
                expected_regexp: None,
            },
            BlockDef {
                name: "bad",
                program: "heading,\nrule",
                expected_regexp: None,
            },
        ];
        assert_eq!(
            Registry::compile_all(&defs),
            Err(RegistryError::Compile {
                name: "bad".into(),
                source: CompileError::MixedSyntax,
            })
        );
    }

    #[test]
    fn test_duplicate_names() {
        let def = BlockDef {
            name: "twice",
            program: "rule",
            expected_regexp: None,
        };
        assert_eq!(
            Registry::compile_all(&[def, def]),
            Err(RegistryError::Duplicate("twice".into()))
        );
    }
}
