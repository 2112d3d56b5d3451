//! The evaluation pipeline: a fixed ordering of rewrite passes over one
//! input string for one evaluation call.
//!
//! Ordering is single-pass by contract. Later passes never re-scan text
//! inserted by earlier passes for their own pattern (no fixpoint
//! iteration), which bounds cost and prevents substitution loops; an
//! inserted value containing a pattern recognized by a *later* pass is
//! still rewritten, since passes run over the whole evolving string in
//! sequence.

use std::sync::LazyLock;

use bon::Builder;
use rand::Rng;
use regex::{Captures, Regex};
use tracing::debug;

use crate::dice::{DiceRoller, NotationDice};
use crate::engine::context::EvalContext;
use crate::engine::registry::MacroRegistry;
use crate::engine::{builtins, random, time};
use crate::hash::{Seed, rng_from_seed};
use crate::types::MacroEnv;

static NEWLINE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\{\{newline\}\}").expect("valid regex")
});
static TRIM_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:\r?\n)*\{\{trim\}\}(?:\r?\n)*").expect("valid regex")
});
static NOOP_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\{\{noop\}\}").expect("valid regex")
});
static INPUT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\{\{input\}\}").expect("valid regex")
});
static ROLL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\{\{roll[ :]([^}]+)\}\}").expect("valid regex")
});

/// An opaque collaborator pass.
///
/// Receives the current text, the environment object, and the escape
/// function, and returns rewritten text. The instruct-mode and
/// user-variable passes plug in through this type.
pub type MacroPass = Box<dyn Fn(&str, &MacroEnv, &dyn Fn(&str) -> String) -> String>;

/// The macro substitution engine.
///
/// Owns the macro registry and the collaborator hooks, and exposes the
/// evaluation entry point. Constructed once at process start and
/// injected wherever evaluation or registration occurs.
///
/// # Example
///
/// ```
/// use macrosub::{ChatMetadata, EvalContext, MacroEngine, macro_env};
///
/// let engine = MacroEngine::new();
/// let mut env = macro_env! { "user" => "Alice" };
/// let mut metadata = ChatMetadata::default();
/// let mut ctx = EvalContext::new(&[], &mut metadata, "chat-1");
///
/// let text = engine.evaluate("Hello {{user}}!", &mut env, &mut ctx);
/// assert_eq!(text, "Hello Alice!");
/// ```
#[derive(Builder)]
#[builder(on(String, into))]
pub struct MacroEngine {
    /// Substituted for an invalid dice formula.
    #[builder(default)]
    invalid_roll_placeholder: String,

    /// Substituted for an empty pick/random list.
    #[builder(default)]
    empty_list_placeholder: String,

    /// Dice collaborator; defaults to the built-in notation roller.
    #[builder(default = Box::new(NotationDice))]
    dice: Box<dyn DiceRoller>,

    /// Instruct-mode macro pass, applied after dice rolls.
    instruct_pass: Option<MacroPass>,

    /// User-variable macro pass, applied after the instruct pass.
    variables_pass: Option<MacroPass>,

    /// Registry of user/plugin macros merged into every evaluation.
    #[builder(skip)]
    registry: MacroRegistry,
}

impl Default for MacroEngine {
    fn default() -> Self {
        MacroEngine::builder().build()
    }
}

impl MacroEngine {
    /// Create an engine with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the macro registry (read-only).
    pub fn registry(&self) -> &MacroRegistry {
        &self.registry
    }

    /// Get the macro registry (mutable) for registering macros.
    pub fn registry_mut(&mut self) -> &mut MacroRegistry {
        &mut self.registry
    }

    /// Expand all macros in `content` without an escaping function.
    pub fn evaluate(
        &self,
        content: &str,
        env: &mut MacroEnv,
        ctx: &mut EvalContext<'_>,
    ) -> String {
        self.evaluate_with(content, env, ctx, &str::to_string)
    }

    /// Expand all macros in `content`, applying `escape` to every
    /// substituted value.
    ///
    /// Stripped comments and removed banned-word directives are deleted,
    /// not substituted, so `escape` never sees them; the idle-duration
    /// phrase is computed internally and also bypasses it.
    pub fn evaluate_with(
        &self,
        content: &str,
        env: &mut MacroEnv,
        ctx: &mut EvalContext<'_>,
        escape: &dyn Fn(&str) -> String,
    ) -> String {
        if content.is_empty() {
            return String::new();
        }

        // Kept for content/position-seeded picks at the end of the pipeline.
        let raw_content = content;

        let mut content = builtins::replace_legacy_tags(content, env, escape);

        // No placeholder opener left: skip every remaining pass.
        if !content.contains("{{") {
            return content;
        }

        content = self.roll_replace(&content, escape);

        if let Some(pass) = &self.instruct_pass {
            content = pass(&content, env, escape);
        }
        if let Some(pass) = &self.variables_pass {
            content = pass(&content, env, escape);
        }

        content = NEWLINE_RE
            .replace_all(&content, |_: &Captures| escape("\n"))
            .into_owned();
        content = TRIM_RE.replace_all(&content, "").into_owned();
        content = NOOP_RE.replace_all(&content, "").into_owned();
        let input = ctx.input;
        content = INPUT_RE
            .replace_all(&content, |_: &Captures| escape(input))
            .into_owned();

        // Registered macros overwrite same-named caller entries by design.
        self.registry.populate_env(env);
        let nonce = evaluation_nonce();

        for key in env.sorted_keys() {
            let Some(value) = env.get(&key) else { continue };
            let pattern = format!(r"(?i)\{{\{{{}\}}\}}", regex::escape(&key));
            let Ok(re) = Regex::new(&pattern) else { continue };
            content = re
                .replace_all(&content, |_: &Captures| escape(&value.resolve(&nonce)))
                .into_owned();
        }

        content = builtins::replace_message_macros(&content, ctx, escape);
        content = builtins::strip_comments(&content);
        content = time::replace_time_macros(&content, escape);
        content = time::replace_datetimeformat(&content, escape);
        content = time::replace_idle_duration(&content, ctx.chat);
        content = time::replace_time_utc(&content, escape);
        content = time::replace_time_diff(&content, escape);
        content = builtins::strip_banned_words(&content, ctx);
        content = random::random_replace(&content, &self.empty_list_placeholder, escape);

        let chat_id_hash = ctx.chat_id_hash();
        content = random::pick_replace(
            &content,
            raw_content,
            chat_id_hash,
            &self.empty_list_placeholder,
            escape,
        );

        content
    }

    /// Substitute `{{roll:<formula>}}` directives.
    ///
    /// A purely numeric argument `N` normalizes to `1dN`. An invalid
    /// formula substitutes the configured placeholder and logs at debug
    /// level; it never fails the evaluation.
    fn roll_replace(&self, content: &str, escape: &dyn Fn(&str) -> String) -> String {
        ROLL_RE
            .replace_all(content, |caps: &Captures| {
                let mut formula = caps[1].trim().to_string();
                if !formula.is_empty() && formula.chars().all(|c| c.is_ascii_digit()) {
                    // A bare number means one die with that many sides.
                    formula = format!("1d{formula}");
                }
                if !self.dice.validate(&formula) {
                    debug!(%formula, "invalid dice formula");
                    return self.invalid_roll_placeholder.clone();
                }
                match self.dice.roll(&formula) {
                    Some(result) => escape(&result.total.to_string()),
                    None => self.invalid_roll_placeholder.clone(),
                }
            })
            .into_owned()
    }
}

/// Fresh opaque token for one evaluation call.
///
/// Passed to every dynamic environment value invoked during
/// substitution, letting a generator distinguish separate evaluation
/// passes while being queried once per matching occurrence within the
/// same pass.
fn evaluation_nonce() -> String {
    let mut rng = rng_from_seed(Seed::Entropy);
    format!("{:016x}", rng.random::<u64>())
}
