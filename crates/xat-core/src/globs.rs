//! Shared glob patterns and glob matching
//!
//! Patterns use brace alternation (`{a,b}`) the way flat-config engines
//! accept them. The `glob` crate has no brace support, so matching expands
//! alternatives first and tests each expansion.

use glob::{MatchOptions, Pattern};

pub const GLOB_SRC_EXT: &str = "{js,mjs,cjs,jsx,ts,mts,cts,tsx}";
pub const GLOB_SRC: &str = "**/*.{js,mjs,cjs,jsx,ts,mts,cts,tsx}";

pub const GLOB_JS: &str = "**/*.{js,mjs,cjs}";
pub const GLOB_JSX: &str = "**/*.{jsx,mjsx,cjsx}";

pub const GLOB_TS: &str = "**/*.{ts,mts,cts}";
pub const GLOB_TSX: &str = "**/*.{tsx,mtsx,ctsx}";
pub const GLOB_DTS: &str = "**/*.d.{ts,mts,cts}";

pub const GLOB_STYLE: &str = "**/*.{css,less,scss}";
pub const GLOB_CSS: &str = "**/*.css";
pub const GLOB_POSTCSS: &str = "**/*.{pcss,postcss}";
pub const GLOB_LESS: &str = "**/*.less";
pub const GLOB_SCSS: &str = "**/*.scss";

pub const GLOB_JSON: &str = "**/*.json";
pub const GLOB_JSON5: &str = "**/*.json5";
pub const GLOB_JSONC: &str = "**/*.jsonc";

pub const GLOB_MARKDOWN: &str = "**/*.md";
pub const GLOB_MARKDOWN_IN_MARKDOWN: &str = "**/*.md/*.md";
pub const GLOB_MARKDOWN_CODE: &str = "**/*.md/**/*.{js,mjs,cjs,jsx,ts,mts,cts,tsx}";

pub const GLOB_YAML: &str = "**/*.{yml,yaml}";
pub const GLOB_TOML: &str = "**/*.toml";
pub const GLOB_XML: &str = "**/*.xml";
pub const GLOB_SVG: &str = "**/*.svg";
pub const GLOB_HTML: &str = "**/*.{htm,html}";
pub const GLOB_GRAPHQL: &str = "**/*.{gql,graphql}";

pub const GLOB_ASTRO: &str = "**/*.astro";
pub const GLOB_ASTRO_TS: &str = "**/*.astro/*.ts";

pub const GLOB_BARREL: &str = "**/index.{js,mjs,cjs,ts,mts,cts}";

pub const GLOB_TESTS: &[&str] = &[
    "**/__tests__/**/*.{js,mjs,cjs,jsx,ts,mts,cts,tsx}",
    "**/*.spec.{js,mjs,cjs,jsx,ts,mts,cts,tsx}",
    "**/*.test.{js,mjs,cjs,jsx,ts,mts,cts,tsx}",
    "**/*.bench.{js,mjs,cjs,jsx,ts,mts,cts,tsx}",
    "**/*.benchmark.{js,mjs,cjs,jsx,ts,mts,cts,tsx}",
];

pub const GLOB_EXCLUDE: &[&str] = &[
    "**/node_modules",
    "**/dist",
    "**/package-lock.json",
    "**/yarn.lock",
    "**/pnpm-lock.yaml",
    "**/bun.lockb",
    "**/output",
    "**/coverage",
    "**/temp",
    "**/.temp",
    "**/tmp",
    "**/.tmp",
    "**/.history",
    "**/.vitepress/cache",
    "**/.nuxt",
    "**/.next",
    "**/.svelte-kit",
    "**/.vercel",
    "**/.changeset",
    "**/.idea",
    "**/.cache",
    "**/.output",
    "**/.vite-inspect",
    "**/.yarn",
    "**/vite.config.*.timestamp-*",
    "**/CHANGELOG*.md",
    "**/*.min.*",
    "**/LICENSE*",
    "**/__snapshots__",
    "**/auto-import{,s}.d.ts",
    "**/components.d.ts",
];

const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: false,
};

/// Expand `{a,b}` alternations, including nested ones.
///
/// A pattern without a balanced brace group is returned as-is.
pub fn expand_braces(pattern: &str) -> Vec<String> {
    let Some(open) = pattern.find('{') else {
        return vec![pattern.to_string()];
    };

    let mut depth = 0usize;
    let mut close = None;
    let mut splits = Vec::new();
    for (offset, ch) in pattern[open..].char_indices() {
        let idx = open + offset;
        match ch {
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    close = Some(idx);
                    break;
                }
            }
            ',' if depth == 1 => splits.push(idx),
            _ => {}
        }
    }

    let Some(close) = close else {
        return vec![pattern.to_string()];
    };

    let prefix = &pattern[..open];
    let suffix = &pattern[close + 1..];

    let mut bounds = Vec::with_capacity(splits.len() + 2);
    bounds.push(open);
    bounds.extend(splits);
    bounds.push(close);

    let mut expanded = Vec::new();
    for window in bounds.windows(2) {
        let alternative = &pattern[window[0] + 1..window[1]];
        for tail in expand_braces(&format!("{prefix}{alternative}{suffix}")) {
            expanded.push(tail);
        }
    }
    expanded
}

/// Whether `path` matches `pattern` (after brace expansion).
///
/// Unparsable expansions are treated as non-matching.
pub fn glob_matches(pattern: &str, path: &str) -> bool {
    expand_braces(pattern).iter().any(|candidate| {
        Pattern::new(candidate)
            .map(|p| p.matches_with(path, MATCH_OPTIONS))
            .unwrap_or(false)
    })
}

/// Whether an ignore pattern excludes `path`: either the path itself or one
/// of its parent directories matches.
pub fn ignore_matches(pattern: &str, path: &str) -> bool {
    if glob_matches(pattern, path) {
        return true;
    }
    path.match_indices('/')
        .any(|(idx, _)| glob_matches(pattern, &path[..idx]))
}

/// Whether an ordered ignore list excludes `path`.
///
/// Later patterns win; a `!pattern` re-includes what an earlier one excluded.
pub fn ignored_by<S: AsRef<str>>(patterns: &[S], path: &str) -> bool {
    patterns.iter().fold(false, |ignored, pattern| {
        match pattern.as_ref().strip_prefix('!') {
            Some(negated) if ignore_matches(negated, path) => false,
            Some(_) => ignored,
            None => ignored || ignore_matches(pattern.as_ref(), path),
        }
    })
}
