//! Top-level declarations and the function statement tree.
//!
//! Only the structure that matters for candidate search is modeled:
//! statement boundaries and block nesting inside the target function.
//! Statement payloads and non-function declarations are carried as token
//! text, untouched by every component of the core.

/// A top-level declaration in a translation unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decl {
    /// A function definition.
    Function(FuncDef),
    /// Any other top-level content (types, globals, directives), preserved
    /// byte-for-byte.
    Verbatim(String),
}

impl Decl {
    /// The function definition, if this declaration is one.
    #[inline]
    pub fn as_function(&self) -> Option<&FuncDef> {
        match self {
            Decl::Function(func) => Some(func),
            Decl::Verbatim(_) => None,
        }
    }
}

/// A function definition: the only subtree a candidate may mutate.
///
/// `Clone` is the deep copy a candidate takes when it assumes ownership of
/// its private instance of the target function.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FuncDef {
    /// Function name as written in the source.
    pub name: String,
    /// Return type text.
    pub ret_type: String,
    /// Parameter list text, without the surrounding parentheses.
    pub params: String,
    /// Function body.
    pub body: Block,
}

/// A brace-delimited statement sequence.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Block {
    /// Statements in source order.
    pub stmts: Vec<Stmt>,
}

impl Block {
    /// Create a block from a statement list.
    #[inline]
    pub fn new(stmts: Vec<Stmt>) -> Self {
        Block { stmts }
    }
}

/// A statement inside a function body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Stmt {
    /// A local variable declaration.
    Local(String),
    /// An expression statement.
    Expr(String),
    /// A return statement with an optional value expression.
    Return(Option<String>),
    /// A nested block.
    Block(Block),
}
