//! External formatters (prettier, dprint) for files no lint rule covers

use super::{FragmentProvider, ProviderContext, fragment_name};
use crate::fragment::ConfigFragment;
use crate::globs::{
    GLOB_CSS, GLOB_GRAPHQL, GLOB_HTML, GLOB_LESS, GLOB_MARKDOWN, GLOB_POSTCSS, GLOB_SCSS, GLOB_SVG,
    GLOB_XML,
};
use crate::options::{FormatterChoice, FormattersOptions, Indent, Quotes, StylisticOptions};
use crate::probe::DependencyProbe;
use crate::result::Result;
use crate::rule::RuleEntry;
use async_trait::async_trait;
use serde_json::{Map, Value, json};
use tracing::debug;

const PRETTIER_XML_PLUGIN: &str = "@prettier/plugin-xml";

pub struct FormattersProvider {
    options: FormattersOptions,
    stylistic: StylisticOptions,
}

impl FormattersProvider {
    pub fn new(options: FormattersOptions, stylistic: StylisticOptions) -> Self {
        Self { options, stylistic }
    }

    fn tab_width(&self) -> u8 {
        match self.stylistic.indent {
            Indent::Spaces(n) => n,
            Indent::Tab => 2,
        }
    }

    fn prettier_options(&self) -> Map<String, Value> {
        let mut options = json_object(json!({
            "endOfLine": "auto",
            "printWidth": 120,
            "semi": self.stylistic.semi,
            "singleQuote": self.stylistic.quotes == Quotes::Single,
            "tabWidth": self.tab_width(),
            "trailingComma": "all",
            "useTabs": self.stylistic.indent == Indent::Tab,
        }));
        if let Some(user) = &self.options.prettier_options {
            options.extend(user.clone());
        }
        options
    }

    fn dprint_options(&self) -> Map<String, Value> {
        let quote_style = if self.stylistic.quotes == Quotes::Single {
            "preferSingle"
        } else {
            "preferDouble"
        };
        let mut options = json_object(json!({
            "indentWidth": self.tab_width(),
            "quoteStyle": quote_style,
            "useTabs": self.stylistic.indent == Indent::Tab,
        }));
        if let Some(user) = &self.options.dprint_options {
            options.extend(user.clone());
        }
        options
    }

    fn xml_options(&self) -> Map<String, Value> {
        let mut options = json_object(json!({
            "xmlQuoteAttributes": "double",
            "xmlSelfClosingSpace": true,
            "xmlSortAttributesByKey": false,
            "xmlWhitespaceSensitivity": "ignore",
        }));
        options.extend(self.prettier_options());
        options
    }
}

fn json_object(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        _ => Map::new(),
    }
}

/// Layer `overrides` on `options`; plugin lists are concatenated,
/// override plugins first
fn merge_prettier_options(options: &Map<String, Value>, overrides: Value) -> Value {
    let overrides = json_object(overrides);
    let plugin_list = |map: &Map<String, Value>| -> Vec<Value> {
        map.get("plugins")
            .and_then(Value::as_array)
            .cloned()
            .unwrap_or_default()
    };

    let mut plugins = plugin_list(&overrides);
    plugins.extend(plugin_list(options));

    let mut merged = options.clone();
    merged.extend(overrides);
    merged.insert("plugins".to_string(), Value::Array(plugins));
    Value::Object(merged)
}

fn formatter_fragment(part: &str, files: &[&str], rule: &str, options: Value) -> ConfigFragment {
    ConfigFragment::named(fragment_name("formatters", part))
        .files(files.iter().copied())
        .language_options(json!({ "parser": "parser-plain" }))
        .rule(rule, RuleEntry::error().with_option(options))
}

#[async_trait]
impl FragmentProvider for FormattersProvider {
    fn name(&self) -> &'static str {
        "formatters"
    }

    async fn provide(&self, ctx: &ProviderContext) -> Result<Vec<ConfigFragment>> {
        let plugin = ctx.plugin("formatters", "eslint-plugin-format").await?;
        let prettier = self.prettier_options();
        let options = &self.options;

        let mut fragments =
            vec![ConfigFragment::named(fragment_name("formatters", "setup")).plugin("format", plugin)];

        if options.css.is_enabled() {
            for (part, files, parser) in [
                ("css", &[GLOB_CSS, GLOB_POSTCSS][..], "css"),
                ("scss", &[GLOB_SCSS][..], "scss"),
                ("less", &[GLOB_LESS][..], "less"),
            ] {
                fragments.push(formatter_fragment(
                    part,
                    files,
                    "format/prettier",
                    merge_prettier_options(&prettier, json!({ "parser": parser })),
                ));
            }
        }

        if options.html.is_enabled() {
            fragments.push(formatter_fragment(
                "html",
                &[GLOB_HTML],
                "format/prettier",
                merge_prettier_options(&prettier, json!({ "parser": "html" })),
            ));
        }

        if options.xml.is_enabled() || options.svg.is_enabled() {
            let xml_plugins: Vec<&str> = if ctx.manifest.has_dependency(PRETTIER_XML_PLUGIN) {
                vec![PRETTIER_XML_PLUGIN]
            } else {
                debug!("{} is not installed; xml formatting uses prettier defaults", PRETTIER_XML_PLUGIN);
                Vec::new()
            };
            let xml = self.xml_options();

            for (part, glob, enabled) in [
                ("xml", GLOB_XML, options.xml.is_enabled()),
                ("svg", GLOB_SVG, options.svg.is_enabled()),
            ] {
                if enabled {
                    fragments.push(formatter_fragment(
                        part,
                        &[glob],
                        "format/prettier",
                        merge_prettier_options(
                            &xml,
                            json!({ "parser": "xml", "plugins": xml_plugins }),
                        ),
                    ));
                }
            }
        }

        match options.markdown {
            FormatterChoice::Off => {}
            FormatterChoice::Prettier => fragments.push(formatter_fragment(
                "markdown",
                &[GLOB_MARKDOWN],
                "format/prettier",
                merge_prettier_options(
                    &prettier,
                    json!({ "embeddedLanguageFormatting": "off", "parser": "markdown" }),
                ),
            )),
            FormatterChoice::Dprint => {
                let mut dprint = self.dprint_options();
                dprint.insert("language".to_string(), Value::from("markdown"));
                fragments.push(formatter_fragment(
                    "markdown",
                    &[GLOB_MARKDOWN],
                    "format/dprint",
                    Value::Object(dprint),
                ));
            }
        }

        if options.graphql.is_enabled() {
            fragments.push(formatter_fragment(
                "graphql",
                &[GLOB_GRAPHQL],
                "format/prettier",
                merge_prettier_options(&prettier, json!({ "parser": "graphql" })),
            ));
        }

        Ok(fragments)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::FeatureOptions;
    use crate::plugin::StaticPluginLoader;
    use crate::probe::ProjectManifest;
    use crate::providers::tests::test_context;
    use std::sync::Arc;

    fn part_names(fragments: &[ConfigFragment]) -> Vec<&str> {
        fragments
            .iter()
            .filter_map(|f| f.name.as_deref())
            .map(|n| n.trim_start_matches("xat/formatters/"))
            .collect()
    }

    #[tokio::test]
    async fn test_enabled_default_formats_everything() {
        let provider =
            FormattersProvider::new(FormattersOptions::enabled_default(), StylisticOptions::default());
        let fragments = provider.provide(&test_context()).await.unwrap();

        assert_eq!(
            part_names(&fragments),
            vec!["setup", "css", "scss", "less", "html", "xml", "svg", "markdown", "graphql"]
        );

        let css = &fragments[1].rules["format/prettier"].options[0];
        assert_eq!(css["parser"], "css");
        assert_eq!(css["useTabs"], true);
        assert_eq!(css["singleQuote"], true);
        assert_eq!(css["printWidth"], 120);
    }

    #[tokio::test]
    async fn test_user_prettier_options_win() {
        let options = FormattersOptions {
            html: FormatterChoice::Prettier,
            prettier_options: Some(json_object(json!({ "printWidth": 80 }))),
            ..Default::default()
        };
        let fragments = FormattersProvider::new(options, StylisticOptions::default())
            .provide(&test_context())
            .await
            .unwrap();

        assert_eq!(part_names(&fragments), vec!["setup", "html"]);
        assert_eq!(
            fragments[1].rules["format/prettier"].options[0]["printWidth"],
            80
        );
    }

    #[tokio::test]
    async fn test_dprint_markdown() {
        let options = FormattersOptions {
            markdown: FormatterChoice::Dprint,
            ..Default::default()
        };
        let stylistic = StylisticOptions {
            indent: Indent::Spaces(4),
            quotes: Quotes::Double,
            ..Default::default()
        };
        let fragments = FormattersProvider::new(options, stylistic)
            .provide(&test_context())
            .await
            .unwrap();

        let markdown = &fragments[1];
        let dprint = &markdown.rules["format/dprint"].options[0];
        assert_eq!(dprint["language"], "markdown");
        assert_eq!(dprint["indentWidth"], 4);
        assert_eq!(dprint["quoteStyle"], "preferDouble");
    }

    #[tokio::test]
    async fn test_xml_plugin_when_installed() {
        let ctx = ProviderContext::new(
            Arc::new(StaticPluginLoader::permissive()),
            Arc::new(ProjectManifest::from_dependencies([(PRETTIER_XML_PLUGIN, "^3.0.0")])),
            std::env::temp_dir(),
        );
        let options = FormattersOptions {
            xml: FormatterChoice::Prettier,
            ..Default::default()
        };
        let fragments = FormattersProvider::new(options, StylisticOptions::default())
            .provide(&ctx)
            .await
            .unwrap();

        let xml = &fragments[1].rules["format/prettier"].options[0];
        assert_eq!(xml["plugins"], json!([PRETTIER_XML_PLUGIN]));
        assert_eq!(xml["xmlWhitespaceSensitivity"], "ignore");
    }

    #[test]
    fn test_merge_prettier_options_concatenates_plugins() {
        let base = json_object(json!({ "semi": false, "plugins": ["a"] }));
        let merged = merge_prettier_options(&base, json!({ "semi": true, "plugins": ["b"] }));
        assert_eq!(merged, json!({ "semi": true, "plugins": ["b", "a"] }));
    }
}
