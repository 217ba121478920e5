// ── Static website component binding ──
//
// Typed proxy for the `azure-static-website:index:Website` remote
// component: a storage origin for the site's files, an optional CDN in
// front of it, and an optional custom-domain DNS binding. The provider
// plugin behind the engine owns every provisioning decision; this module
// only marshals arguments and unmarshals outputs.

use std::collections::HashMap;

use serde_json::Value;

use sitelift_api::engine_types::PropertyMap;

use crate::context::Context;
use crate::convert;
use crate::error::CoreError;
use crate::output::{Input, Output};
use crate::resource::{RegisteredComponent, ResourceOptions, Urn};

/// Component type token implemented by the azure-static-website provider
/// plugin.
pub const WEBSITE_TYPE: &str = "azure-static-website:index:Website";

// ── Arguments ───────────────────────────────────────────────────────

/// Arguments for constructing a [`Website`].
///
/// Every field accepts either a literal or another resource's deferred
/// output. Unset optional fields are omitted from the wire payload, and
/// the provider decides which outputs to populate from what is present
/// (no `with_cdn` means no CDN URL, for example).
#[derive(Debug, Clone, Default)]
pub struct WebsiteArgs {
    /// Root directory containing the website's contents. Required.
    pub site_path: Option<Input<String>>,
    /// Default document for the site. The provider defaults to `index.html`.
    pub index_document: Option<Input<String>>,
    /// Default 404 error page. The provider defaults to `error.html`.
    pub error_document: Option<Input<String>>,
    /// DNS zone that will serve the site. Must be set for the site to be
    /// reachable from a custom domain.
    pub dns_zone_name: Option<Input<String>>,
    /// Name of the resource group the DNS zone is attached to.
    pub domain_resource_group: Option<Input<String>>,
    /// Subdomain used to access the site. Unset means the apex/root
    /// domain of the DNS zone.
    pub subdomain: Option<Input<String>>,
    /// Provision a CDN to serve content.
    pub with_cdn: Option<Input<bool>>,
}

// ── Resource handle ─────────────────────────────────────────────────

/// Handle to a provisioned static website.
///
/// Outputs are deferred values so they compose with other resources in
/// the deployment graph; each carries this resource's URN as a
/// dependency hint.
#[derive(Debug, Clone)]
pub struct Website {
    urn: Urn,
    /// Storage origin URL for the site. Always present.
    pub origin_url: Output<String>,
    /// CDN URL, populated when a CDN was provisioned.
    pub cdn_url: Output<Option<String>>,
    /// Custom-domain URL, populated when a DNS zone was bound.
    pub custom_domain_url: Output<Option<String>>,
    /// Name of the resource group created to hold the site's resources.
    pub resource_group_name: Output<String>,
}

/// Deferred homogeneous list of websites, indexable via
/// [`Output::index`].
pub type WebsiteArray = Output<Vec<Website>>;

/// Deferred keyed collection of websites, accessible via
/// [`Output::key`].
pub type WebsiteMap = Output<HashMap<String, Website>>;

impl Website {
    /// Register a new website with the given unique logical name,
    /// arguments, and options.
    ///
    /// Argument validation happens before any engine call: an unset
    /// `site_path` or a blank literal one fails immediately. After
    /// validation the arguments are resolved and marshaled, the
    /// registration is delegated to the engine exactly once, and the
    /// engine's result or error is returned unchanged.
    pub async fn new(
        ctx: &Context,
        name: &str,
        args: WebsiteArgs,
        options: ResourceOptions,
    ) -> Result<Self, CoreError> {
        validate(&args)?;

        let mut options = options;
        let inputs = marshal(&args, &mut options).await?;

        let registered = ctx
            .register_remote_component(WEBSITE_TYPE, name, inputs, &options)
            .await?;

        Self::from_registration(registered)
    }

    /// Engine-assigned URN of this resource.
    pub fn urn(&self) -> &Urn {
        &self.urn
    }

    /// The outputs as a wire property map, e.g. for
    /// [`Context::register_outputs`].
    pub async fn outputs(&self) -> Result<PropertyMap, CoreError> {
        let mut map = PropertyMap::new();
        map.insert("originURL".into(), Value::from(self.origin_url.get().await?));
        if let Some(cdn) = self.cdn_url.get().await? {
            map.insert("cdnURL".into(), Value::from(cdn));
        }
        if let Some(domain) = self.custom_domain_url.get().await? {
            map.insert("customDomainURL".into(), Value::from(domain));
        }
        map.insert(
            "resourceGroupName".into(),
            Value::from(self.resource_group_name.get().await?),
        );
        Ok(map)
    }

    fn from_registration(registered: RegisteredComponent) -> Result<Self, CoreError> {
        let RegisteredComponent { urn, outputs, .. } = registered;

        let origin_url = convert::required_string(&outputs, "originURL", WEBSITE_TYPE)?;
        let resource_group_name =
            convert::required_string(&outputs, "resourceGroupName", WEBSITE_TYPE)?;
        let cdn_url = convert::optional_string(&outputs, "cdnURL");
        let custom_domain_url = convert::optional_string(&outputs, "customDomainURL");

        Ok(Self {
            origin_url: Output::from_value(origin_url).with_dependency(urn.clone()),
            cdn_url: Output::from_value(cdn_url).with_dependency(urn.clone()),
            custom_domain_url: Output::from_value(custom_domain_url)
                .with_dependency(urn.clone()),
            resource_group_name: Output::from_value(resource_group_name)
                .with_dependency(urn.clone()),
            urn,
        })
    }
}

// ── Validation and marshaling ───────────────────────────────────────

fn validate(args: &WebsiteArgs) -> Result<(), CoreError> {
    let site_path = args
        .site_path
        .as_ref()
        .ok_or_else(|| CoreError::MissingArgument {
            resource: "Website".into(),
            field: "site_path".into(),
        })?;

    if let Some(path) = site_path.literal() {
        if path.trim().is_empty() {
            return Err(CoreError::InvalidArgument {
                field: "site_path".into(),
                reason: "must not be empty".into(),
            });
        }
    }

    Ok(())
}

/// Resolve the arguments into the wire property map, folding the
/// dependencies of deferred inputs into the registration options.
async fn marshal(
    args: &WebsiteArgs,
    options: &mut ResourceOptions,
) -> Result<PropertyMap, CoreError> {
    let mut inputs = PropertyMap::new();

    insert_string(&mut inputs, options, "sitePath", args.site_path.as_ref()).await?;
    insert_string(
        &mut inputs,
        options,
        "indexDocument",
        args.index_document.as_ref(),
    )
    .await?;
    insert_string(
        &mut inputs,
        options,
        "errorDocument",
        args.error_document.as_ref(),
    )
    .await?;
    insert_string(
        &mut inputs,
        options,
        "dnsZoneName",
        args.dns_zone_name.as_ref(),
    )
    .await?;
    insert_string(
        &mut inputs,
        options,
        "domainResourceGroup",
        args.domain_resource_group.as_ref(),
    )
    .await?;
    insert_string(&mut inputs, options, "subdomain", args.subdomain.as_ref()).await?;
    insert_bool(&mut inputs, options, "withCDN", args.with_cdn.as_ref()).await?;

    Ok(inputs)
}

async fn insert_string(
    inputs: &mut PropertyMap,
    options: &mut ResourceOptions,
    key: &str,
    input: Option<&Input<String>>,
) -> Result<(), CoreError> {
    let Some(input) = input else { return Ok(()) };

    options
        .depends_on
        .extend(input.dependencies().iter().cloned());
    let value = input.resolve().await?;
    inputs.insert(key.to_owned(), Value::from(value));
    Ok(())
}

async fn insert_bool(
    inputs: &mut PropertyMap,
    options: &mut ResourceOptions,
    key: &str,
    input: Option<&Input<bool>>,
) -> Result<(), CoreError> {
    let Some(input) = input else { return Ok(()) };

    options
        .depends_on
        .extend(input.dependencies().iter().cloned());
    let value = input.resolve().await?;
    inputs.insert(key.to_owned(), Value::from(value));
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;
    use crate::config::EngineConfig;

    fn registered(outputs: serde_json::Value) -> RegisteredComponent {
        let Value::Object(outputs) = outputs else {
            panic!("outputs fixture must be a JSON object")
        };
        RegisteredComponent {
            urn: Urn::new(format!("urn:sitelift:dev::main::{WEBSITE_TYPE}::site")),
            id: None,
            outputs,
        }
    }

    #[tokio::test]
    async fn default_args_fail_with_missing_argument_before_any_call() {
        // Unconnected context: reaching the engine would error with
        // DeploymentNotOpen, so MissingArgument proves validation ran first.
        let ctx = Context::new(EngineConfig::default());
        let err = Website::new(&ctx, "site", WebsiteArgs::default(), ResourceOptions::default())
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            CoreError::MissingArgument { ref field, .. } if field == "site_path"
        ));
    }

    #[tokio::test]
    async fn blank_site_path_fails_with_invalid_argument() {
        let ctx = Context::new(EngineConfig::default());
        let args = WebsiteArgs {
            site_path: Some("   ".into()),
            ..WebsiteArgs::default()
        };
        let err = Website::new(&ctx, "site", args, ResourceOptions::default())
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            CoreError::InvalidArgument { ref field, .. } if field == "site_path"
        ));
    }

    #[tokio::test]
    async fn marshal_uses_wire_field_names_and_skips_unset() {
        let args = WebsiteArgs {
            site_path: Some("./www".into()),
            index_document: Some("home.html".into()),
            with_cdn: Some(true.into()),
            ..WebsiteArgs::default()
        };
        let mut options = ResourceOptions::default();

        let inputs = marshal(&args, &mut options).await.unwrap();

        assert_eq!(
            Value::Object(inputs),
            json!({
                "sitePath": "./www",
                "indexDocument": "home.html",
                "withCDN": true
            })
        );
    }

    #[tokio::test]
    async fn marshal_collects_dependencies_from_deferred_inputs() {
        let zone_urn = Urn::new("urn:sitelift:dev::main::dns:index:Zone::zone");
        let zone_name = Output::from_value("example.net".to_owned())
            .with_dependency(zone_urn.clone());

        let args = WebsiteArgs {
            site_path: Some("./www".into()),
            dns_zone_name: Some(zone_name.into()),
            ..WebsiteArgs::default()
        };
        let mut options = ResourceOptions::default();

        let inputs = marshal(&args, &mut options).await.unwrap();

        assert_eq!(
            inputs.get("dnsZoneName").and_then(Value::as_str),
            Some("example.net")
        );
        assert_eq!(options.depends_on, vec![zone_urn]);
    }

    #[tokio::test]
    async fn outputs_unmarshal_with_optional_fields_absent() {
        let website = Website::from_registration(registered(json!({
            "originURL": "https://account.z13.web.core.windows.net/",
            "resourceGroupName": "resource-group-7f3a"
        })))
        .unwrap();

        assert_eq!(
            website.origin_url.get().await.unwrap(),
            "https://account.z13.web.core.windows.net/"
        );
        assert_eq!(website.cdn_url.get().await.unwrap(), None);
        assert_eq!(website.custom_domain_url.get().await.unwrap(), None);
        assert_eq!(
            website.resource_group_name.get().await.unwrap(),
            "resource-group-7f3a"
        );
        assert_eq!(website.urn().name(), Some("site"));
        assert_eq!(website.origin_url.dependencies(), &[website.urn().clone()]);
    }

    #[tokio::test]
    async fn outputs_unmarshal_with_cdn_and_domain() {
        let website = Website::from_registration(registered(json!({
            "originURL": "https://account.z13.web.core.windows.net/",
            "cdnURL": "https://endpoint-abc.azureedge.net",
            "customDomainURL": "https://www.example.net",
            "resourceGroupName": "resource-group-7f3a"
        })))
        .unwrap();

        assert_eq!(
            website.cdn_url.get().await.unwrap().as_deref(),
            Some("https://endpoint-abc.azureedge.net")
        );
        assert_eq!(
            website.custom_domain_url.get().await.unwrap().as_deref(),
            Some("https://www.example.net")
        );
    }

    #[tokio::test]
    async fn missing_origin_url_is_a_missing_output() {
        let err = Website::from_registration(registered(json!({
            "resourceGroupName": "resource-group-7f3a"
        })))
        .unwrap_err();

        assert!(matches!(
            err,
            CoreError::MissingOutput { ref output, .. } if output == "originURL"
        ));
    }

    #[tokio::test]
    async fn website_array_index_has_vec_get_semantics() {
        let first = Website::from_registration(registered(json!({
            "originURL": "https://one.example/",
            "resourceGroupName": "rg-one"
        })))
        .unwrap();
        let second = Website::from_registration(registered(json!({
            "originURL": "https://two.example/",
            "resourceGroupName": "rg-two"
        })))
        .unwrap();

        let array: WebsiteArray = Output::from_value(vec![first, second]);

        let found = array.index(1).get().await.unwrap().unwrap();
        assert_eq!(found.origin_url.get().await.unwrap(), "https://two.example/");
        assert!(array.index(7).get().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn website_map_key_has_hashmap_get_semantics() {
        let site = Website::from_registration(registered(json!({
            "originURL": "https://one.example/",
            "resourceGroupName": "rg-one"
        })))
        .unwrap();

        let mut sites = HashMap::new();
        sites.insert("docs".to_owned(), site);
        let map: WebsiteMap = Output::from_value(sites);

        let found = map.key("docs").get().await.unwrap().unwrap();
        assert_eq!(found.origin_url.get().await.unwrap(), "https://one.example/");
        assert!(map.key("blog").get().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn outputs_property_map_roundtrip() {
        let website = Website::from_registration(registered(json!({
            "originURL": "https://one.example/",
            "cdnURL": "https://cdn.example/",
            "resourceGroupName": "rg-one"
        })))
        .unwrap();

        let map = website.outputs().await.unwrap();
        assert_eq!(
            map.get("originURL").and_then(Value::as_str),
            Some("https://one.example/")
        );
        assert_eq!(
            map.get("cdnURL").and_then(Value::as_str),
            Some("https://cdn.example/")
        );
        assert!(!map.contains_key("customDomainURL"));
    }
}
