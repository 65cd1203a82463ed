//! Global ignores derived from `.gitignore` files

use super::{FragmentProvider, ProviderContext};
use crate::error::XatError;
use crate::fragment::ConfigFragment;
use crate::options::GitignoreOptions;
use crate::result::Result;
use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::Path;
use tracing::debug;

pub struct GitignoreProvider {
    options: GitignoreOptions,
}

impl GitignoreProvider {
    pub fn new(options: GitignoreOptions) -> Self {
        Self { options }
    }
}

#[async_trait]
impl FragmentProvider for GitignoreProvider {
    fn name(&self) -> &'static str {
        "gitignore"
    }

    async fn provide(&self, ctx: &ProviderContext) -> Result<Vec<ConfigFragment>> {
        let root = self.options.root.as_deref().unwrap_or(&ctx.cwd);
        let mut ignores = Vec::new();

        for file in &self.options.files {
            let path = root.join(file);
            let content = match tokio::fs::read_to_string(&path).await {
                Ok(content) => content,
                Err(e) if e.kind() == ErrorKind::NotFound && !self.options.strict => {
                    debug!("Skipping missing ignore file {}", path.display());
                    continue;
                }
                Err(e) => return Err(XatError::io_error(path, e)),
            };

            let prefix = relative_prefix(&ctx.cwd, path.parent().unwrap_or(root));
            ignores.extend(gitignore_to_globs(&content, &prefix));
        }

        debug!("Derived {} ignore globs from gitignore files", ignores.len());
        Ok(vec![ConfigFragment::named("xat/gitignore").ignores(ignores)])
    }
}

/// Directory of an ignore file relative to the working directory, as a
/// `/`-separated prefix (empty when it is the working directory itself or
/// lies outside it)
fn relative_prefix(cwd: &Path, dir: &Path) -> String {
    dir.strip_prefix(cwd)
        .map(|rel| {
            rel.components()
                .map(|c| c.as_os_str().to_string_lossy())
                .collect::<Vec<_>>()
                .join("/")
        })
        .unwrap_or_default()
}

/// Convert `.gitignore` content into flat-config ignore globs.
///
/// Comments and blank lines are dropped and negations are kept. A pattern
/// with a slash before its last character is anchored to `dir`; any other
/// pattern matches at every depth below it.
pub fn gitignore_to_globs(content: &str, dir: &str) -> Vec<String> {
    content
        .lines()
        .filter_map(|line| {
            let line = line.trim_end();
            if line.is_empty() || line.starts_with('#') {
                return None;
            }

            let (negated, pattern) = match line.strip_prefix('!') {
                Some(rest) => (true, rest),
                None => (false, line.strip_prefix('\\').unwrap_or(line)),
            };

            let glob = convert_pattern(pattern, dir)?;
            Some(if negated { format!("!{glob}") } else { glob })
        })
        .collect()
}

fn convert_pattern(pattern: &str, dir: &str) -> Option<String> {
    if matches!(pattern, "**" | "/**" | "**/") {
        return Some(pattern.to_string());
    }

    let anchored = pattern
        .find('/')
        .is_some_and(|idx| idx + 1 < pattern.len());
    // Directory patterns match the directory; its contents follow from it
    let body = pattern.trim_start_matches('/').trim_end_matches('/');
    if body.is_empty() {
        return None;
    }

    let scope = if dir.is_empty() {
        String::new()
    } else {
        format!("{dir}/")
    };

    Some(if anchored {
        format!("{scope}{body}")
    } else {
        format!("{scope}**/{body}")
    })
}
