//! Deploy command handler.

use owo_colors::OwoColorize;
use serde::Serialize;

use sitelift_core::{Context, EngineConfig, ResourceOptions, Website, WebsiteArgs};

use crate::cli::{DeployArgs, GlobalOpts};
use crate::error::CliError;
use crate::output;

// ── Report ──────────────────────────────────────────────────────────

/// Resolved deployment result as shown to the user.
#[derive(Debug, Serialize)]
struct DeployReport {
    urn: String,
    origin_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    cdn_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    custom_domain_url: Option<String>,
    resource_group_name: String,
}

impl DeployReport {
    /// The most specific URL the site is reachable at.
    fn live_url(&self) -> &str {
        self.custom_domain_url
            .as_deref()
            .or(self.cdn_url.as_deref())
            .unwrap_or(&self.origin_url)
    }
}

fn detail(report: &DeployReport) -> String {
    let mut lines = vec![
        format!("URN:            {}", report.urn),
        format!("Origin URL:     {}", report.origin_url),
    ];
    if let Some(ref cdn) = report.cdn_url {
        lines.push(format!("CDN URL:        {cdn}"));
    }
    if let Some(ref domain) = report.custom_domain_url {
        lines.push(format!("Custom domain:  {domain}"));
    }
    lines.push(format!("Resource group: {}", report.resource_group_name));
    lines.join("\n")
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    config: EngineConfig,
    args: DeployArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let report = Context::run(config, |ctx| async move {
        let website = Website::new(
            &ctx,
            &args.name,
            WebsiteArgs {
                site_path: Some(args.site_path.as_str().into()),
                index_document: args.index_document.map(Into::into),
                error_document: args.error_document.map(Into::into),
                dns_zone_name: args.dns_zone.map(Into::into),
                domain_resource_group: args.domain_resource_group.map(Into::into),
                subdomain: args.subdomain.map(Into::into),
                with_cdn: args.with_cdn.then(|| true.into()),
            },
            ResourceOptions {
                protect: args.protect,
                ..ResourceOptions::default()
            },
        )
        .await?;

        if args.publish_outputs {
            let outputs = website.outputs().await?;
            ctx.register_outputs(website.urn(), outputs).await?;
        }

        Ok(DeployReport {
            urn: website.urn().to_string(),
            origin_url: website.origin_url.get().await?,
            cdn_url: website.cdn_url.get().await?,
            custom_domain_url: website.custom_domain_url.get().await?,
            resource_group_name: website.resource_group_name.get().await?,
        })
    })
    .await?;

    let rendered = output::render_single(&global.output, &report, detail, |r| {
        r.origin_url.clone()
    });
    output::print_output(&rendered, global.quiet);

    if !global.quiet {
        if output::should_color() {
            eprintln!("{} {}", "✔ deployed".green().bold(), report.live_url());
        } else {
            eprintln!("✔ deployed {}", report.live_url());
        }
    }
    Ok(())
}
