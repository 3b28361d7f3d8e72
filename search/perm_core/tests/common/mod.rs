//! Deterministic collaborator stubs for lifecycle tests.
//!
//! The grammar understood here is a tiny C subset: top-level declarations
//! split on `;` and balanced braces, function bodies split into statements
//! and nested blocks. Just enough structure for the core's contracts to be
//! exercised end to end.

#![allow(dead_code)]

use std::cell::Cell;
use std::fs;
use std::hash::{Hash, Hasher};
use std::path::{Path, PathBuf};

use rand::Rng;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use rustc_hash::FxHasher;

use perm_ir::{Block, CandidateTree, Decl, DeclId, FuncDef, Stmt, TranslationUnit};

use perm_core::{
    Compiler, NormalizeError, Normalized, Normalizer, RandomizeError, Randomizer,
    Renderer, Score, ScoreError, ScoreOutcome, Scorer,
};

/// Route `tracing` output through the test harness when `RUST_LOG` is set.
pub fn init_tracing() {
    use tracing_subscriber::EnvFilter;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

// --- Normalizer ---

/// Parses the test grammar and canonicalizes statement whitespace.
pub struct TestNormalizer;

impl Normalizer for TestNormalizer {
    fn parse_and_extract(
        &self,
        source: &str,
        fn_name: &str,
    ) -> Result<Normalized, NormalizeError> {
        let unit = parse_unit(source)?;
        let (fn_index, _) = unit
            .find_function(fn_name)
            .ok_or_else(|| NormalizeError::FunctionNotFound(fn_name.to_owned()))?;
        Ok(Normalized { unit, fn_index })
    }
}

fn parse_unit(source: &str) -> Result<TranslationUnit, NormalizeError> {
    let mut decls = Vec::new();
    for chunk in split_top_level(source)? {
        decls.push(parse_decl(&chunk)?);
    }
    Ok(TranslationUnit::new(decls))
}

/// Split source into top-level chunks ending at `;` or a balanced `}`.
fn split_top_level(source: &str) -> Result<Vec<String>, NormalizeError> {
    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut depth = 0usize;

    for ch in source.chars() {
        current.push(ch);
        match ch {
            '{' => depth += 1,
            '}' => {
                depth = depth
                    .checked_sub(1)
                    .ok_or_else(|| NormalizeError::Parse("unbalanced `}`".into()))?;
                if depth == 0 {
                    chunks.push(std::mem::take(&mut current));
                }
            }
            ';' if depth == 0 => chunks.push(std::mem::take(&mut current)),
            _ => {}
        }
    }
    if depth != 0 {
        return Err(NormalizeError::Parse("unbalanced `{`".into()));
    }
    if !current.trim().is_empty() {
        return Err(NormalizeError::Parse(format!(
            "trailing content `{}`",
            current.trim()
        )));
    }
    Ok(chunks
        .into_iter()
        .filter(|chunk| !chunk.trim().is_empty())
        .collect())
}

fn parse_decl(chunk: &str) -> Result<Decl, NormalizeError> {
    let trimmed = chunk.trim();
    let Some(open) = trimmed.find('{') else {
        return Ok(Decl::Verbatim(normalize_ws(trimmed)));
    };
    let header = &trimmed[..open];
    let Some(paren) = header.find('(') else {
        // Braced non-function content (struct definitions and the like).
        return Ok(Decl::Verbatim(normalize_ws(trimmed)));
    };
    let close = header
        .rfind(')')
        .ok_or_else(|| NormalizeError::Parse(format!("missing `)` in `{header}`")))?;

    let params = normalize_ws(&header[paren + 1..close]);
    let before = normalize_ws(&header[..paren]);
    let (ret_type, name) = before
        .rsplit_once(' ')
        .ok_or_else(|| NormalizeError::Parse(format!("missing return type in `{before}`")))?;

    let body_text = &trimmed[open + 1..trimmed.len() - 1];
    Ok(Decl::Function(FuncDef {
        name: name.to_owned(),
        ret_type: ret_type.to_owned(),
        params,
        body: parse_block(body_text)?,
    }))
}

fn parse_block(text: &str) -> Result<Block, NormalizeError> {
    let mut stmts = Vec::new();
    let mut rest = text.trim_start();

    while !rest.is_empty() {
        if rest.starts_with('{') {
            let end = matching_brace(rest)?;
            stmts.push(Stmt::Block(parse_block(&rest[1..end])?));
            rest = rest[end + 1..].trim_start();
        } else {
            let semi = rest.find(';').ok_or_else(|| {
                NormalizeError::Parse(format!("missing `;` after `{}`", rest.trim()))
            })?;
            stmts.push(classify(normalize_ws(&rest[..semi])));
            rest = rest[semi + 1..].trim_start();
        }
    }
    Ok(Block::new(stmts))
}

fn matching_brace(text: &str) -> Result<usize, NormalizeError> {
    let mut depth = 0usize;
    for (pos, ch) in text.char_indices() {
        match ch {
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Ok(pos);
                }
            }
            _ => {}
        }
    }
    Err(NormalizeError::Parse("unbalanced `{`".into()))
}

fn classify(text: String) -> Stmt {
    if text == "return" {
        return Stmt::Return(None);
    }
    if let Some(value) = text.strip_prefix("return ") {
        return Stmt::Return(Some(value.to_owned()));
    }
    let first = text.split(' ').next().unwrap_or_default();
    let is_type = matches!(
        first,
        "void" | "char" | "short" | "int" | "long" | "float" | "double" | "unsigned"
            | "signed" | "s8" | "s16" | "s32" | "u8" | "u16" | "u32"
    );
    if is_type {
        Stmt::Local(text)
    } else {
        Stmt::Expr(text)
    }
}

/// Collapse all whitespace runs to single spaces.
fn normalize_ws(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

// --- Renderer ---

/// Serializes the tree back to C-style source text.
pub struct CRenderer;

impl Renderer for CRenderer {
    fn render(&self, tree: &CandidateTree) -> String {
        let mut out = String::new();
        for (_, decl) in tree.decls() {
            match decl {
                Decl::Verbatim(text) => {
                    out.push_str(text);
                    out.push('\n');
                }
                Decl::Function(func) => render_function(&mut out, func),
            }
        }
        out
    }
}

fn render_function(out: &mut String, func: &FuncDef) {
    out.push_str(&func.ret_type);
    out.push(' ');
    out.push_str(&func.name);
    out.push('(');
    out.push_str(&func.params);
    out.push_str(")\n");
    render_block(out, &func.body, 0);
}

fn render_block(out: &mut String, block: &Block, indent: usize) {
    let pad = "    ".repeat(indent);
    out.push_str(&pad);
    out.push_str("{\n");
    for stmt in &block.stmts {
        match stmt {
            Stmt::Local(text) | Stmt::Expr(text) => {
                out.push_str(&format!("{pad}    {text};\n"));
            }
            Stmt::Return(None) => out.push_str(&format!("{pad}    return;\n")),
            Stmt::Return(Some(value)) => {
                out.push_str(&format!("{pad}    return {value};\n"));
            }
            Stmt::Block(inner) => render_block(out, inner, indent + 1),
        }
    }
    out.push_str(&pad);
    out.push_str("}\n");
}

/// Renderer wrapper that counts invocations, for memoization tests.
pub struct CountingRenderer {
    calls: Cell<usize>,
}

impl CountingRenderer {
    pub fn new() -> Self {
        CountingRenderer {
            calls: Cell::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.get()
    }
}

impl Renderer for CountingRenderer {
    fn render(&self, tree: &CandidateTree) -> String {
        self.calls.set(self.calls.get() + 1);
        CRenderer.render(tree)
    }
}

// --- Randomizer ---

/// Swaps two distinct statements of the target function, chosen by a
/// seed-determined stream.
#[derive(Debug)]
pub struct SwapRandomizer {
    rng: Pcg32,
}

impl Randomizer for SwapRandomizer {
    fn from_seed(seed: u64) -> Self {
        SwapRandomizer {
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    fn apply(
        &mut self,
        tree: &mut CandidateTree,
        fn_index: DeclId,
    ) -> Result<(), RandomizeError> {
        let func = tree.function_mut(fn_index).ok_or_else(|| {
            RandomizeError::Engine("target function is not owned by this tree".into())
        })?;
        let len = func.body.stmts.len();
        if len < 2 {
            return Err(RandomizeError::NoMutationSite(func.name.clone()));
        }
        let first = self.rng.gen_range(0..len);
        let mut second = self.rng.gen_range(0..len - 1);
        if second >= first {
            second += 1;
        }
        func.body.stmts.swap(first, second);
        Ok(())
    }
}

/// Engine that never finds a mutation site.
pub struct NoSiteRandomizer;

impl Randomizer for NoSiteRandomizer {
    fn from_seed(_seed: u64) -> Self {
        NoSiteRandomizer
    }

    fn apply(
        &mut self,
        tree: &mut CandidateTree,
        fn_index: DeclId,
    ) -> Result<(), RandomizeError> {
        let name = tree
            .function(fn_index)
            .map_or_else(|| "<unknown>".to_owned(), |func| func.name.clone());
        Err(RandomizeError::NoMutationSite(name))
    }
}

// --- Compiler ---

/// "Compiles" by writing the source bytes to an object file, so identical
/// source yields identical artifact content.
pub struct ObjCompiler {
    dir: PathBuf,
    seq: Cell<u64>,
}

impl ObjCompiler {
    pub fn new(dir: &Path) -> Self {
        ObjCompiler {
            dir: dir.to_owned(),
            seq: Cell::new(0),
        }
    }
}

impl Compiler for ObjCompiler {
    fn compile(&self, source: &str, _show_errors: bool) -> Option<PathBuf> {
        let seq = self.seq.get();
        self.seq.set(seq + 1);
        let path = self.dir.join(format!("cand_{seq}.o"));
        fs::write(&path, source.as_bytes()).ok()?;
        Some(path)
    }
}

/// Compiler that always signals failure.
pub struct FailingCompiler;

impl Compiler for FailingCompiler {
    fn compile(&self, _source: &str, show_errors: bool) -> Option<PathBuf> {
        if show_errors {
            eprintln!("error: synthetic compile failure");
        }
        None
    }
}

// --- Scorer ---

/// Content fingerprint of artifact bytes.
pub fn fingerprint(bytes: &[u8]) -> String {
    let mut hasher = FxHasher::default();
    bytes.hash(&mut hasher);
    format!("{:016x}", hasher.finish())
}

/// Scores by byte difference against a target artifact.
pub struct DiffScorer {
    target: Vec<u8>,
}

impl DiffScorer {
    pub fn against(target: impl Into<Vec<u8>>) -> Self {
        DiffScorer {
            target: target.into(),
        }
    }
}

impl Scorer for DiffScorer {
    fn score(&self, artifact: Option<&Path>) -> Result<ScoreOutcome, ScoreError> {
        let Some(path) = artifact else {
            // No artifact compares as far from the target as possible.
            return Ok(ScoreOutcome {
                score: Score(u64::MAX),
                fingerprint: String::new(),
            });
        };
        let bytes =
            fs::read(path).map_err(|err| ScoreError::Artifact(err.to_string()))?;
        let len_diff = self.target.len().abs_diff(bytes.len()) as u64;
        let byte_diff = self
            .target
            .iter()
            .zip(&bytes)
            .filter(|(target, candidate)| target != candidate)
            .count() as u64;
        Ok(ScoreOutcome {
            score: Score(len_diff + byte_diff),
            fingerprint: fingerprint(&bytes),
        })
    }
}

/// Scorer that always signals failure.
pub struct FailingScorer;

impl Scorer for FailingScorer {
    fn score(&self, _artifact: Option<&Path>) -> Result<ScoreOutcome, ScoreError> {
        Err(ScoreError::Comparison("synthetic scoring failure".into()))
    }
}
