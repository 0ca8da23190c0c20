//! Minify generated css

use crate::prelude::*;

/// Parse the css and print it back out minified
pub(crate) fn minify_css(css_content: &str) -> Result<String> {
    let mut styles = lightningcss::stylesheet::StyleSheet::parse(
        css_content,
        lightningcss::stylesheet::ParserOptions {
            filename: String::from("<GENERATED CSS>.css"),
            error_recovery: false,
            ..Default::default()
        },
    )
    .map_err(|err| anyhow!("Failed to parse css {err}"))?;

    let targets = lightningcss::targets::Targets::default();
    styles.minify(lightningcss::stylesheet::MinifyOptions {
        targets,
        ..Default::default()
    })?;

    let css_content = styles.to_css(lightningcss::printer::PrinterOptions {
        minify: true,
        targets,
        ..Default::default()
    })?;

    Ok(css_content.code)
}
