//! Turning a validated manifest into a route forest.

use std::collections::HashMap;

use crate::config::loader::ConfigError;
use crate::config::schema::{Manifest, RouteTable};
use crate::config::validation::ValidationError;
use crate::http::Stage;
use crate::routing::{Router, Routes};

/// Bind every route of `manifest` into a fresh forest.
///
/// Each table is bound through its own router: `use` derives the router,
/// routes are bound, nested groups are derived from it, and finally
/// `global` handlers are inserted.
pub fn build_routes(manifest: &Manifest) -> Result<Routes<Stage>, ConfigError> {
    let stages = manifest
        .handlers
        .iter()
        .map(|config| Stage::from_config(config).map(|stage| (config.name.clone(), stage)))
        .collect::<Result<HashMap<_, _>, ValidationError>>()
        .map_err(|e| ConfigError::Validation(vec![e]))?;

    let mut routes = Routes::new();
    bind_table(&mut routes.router(), &stages, &manifest.root)?;

    tracing::info!(
        routes = routes.len(),
        scopes = routes.scopes().count(),
        "Route forest built"
    );
    Ok(routes)
}

fn bind_table(
    parent: &mut Router<'_, Stage>,
    stages: &HashMap<String, Stage>,
    table: &RouteTable,
) -> Result<(), ConfigError> {
    let mut router = parent.using(resolve(stages, &table.pre_handlers)?);

    for route in &table.routes {
        let handlers = resolve(stages, &route.handlers)?;
        router
            .bind(&route.scope, &route.path, handlers)?
            .attach(route.attachments.clone());
    }

    for group in &table.groups {
        let mut nested = router.group(&group.prefix)?;
        bind_table(&mut nested, stages, &group.table)?;
    }

    router.insert_global_pre_handlers(resolve(stages, &table.global)?)?;
    Ok(())
}

fn resolve(stages: &HashMap<String, Stage>, names: &[String]) -> Result<Vec<Stage>, ConfigError> {
    names
        .iter()
        .map(|name| {
            stages.get(name).cloned().ok_or_else(|| {
                ConfigError::Validation(vec![ValidationError::UnknownHandler {
                    context: "compile".to_string(),
                    handler: name.clone(),
                }])
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::loader::parse_manifest;
    use crate::routing::RouteError;

    const MANIFEST: &str = r#"
        use = ["log"]
        global = ["audit"]

        [[handlers]]
        name = "log"
        action = "pass"

        [[handlers]]
        name = "audit"
        action = "pass"

        [[handlers]]
        name = "auth"
        action = "pass"

        [[handlers]]
        name = "list"
        action = "reply"

        [[handlers]]
        name = "get_item"
        action = "reply"

        [[routes]]
        scope = "get"
        path = "/items"
        handlers = ["list"]
        description = "List items"

        [[groups]]
        prefix = "/api"
        use = ["auth"]

        [[groups.routes]]
        scope = "GET"
        path = "/items/{id}"
        handlers = ["get_item"]
        sensitive = true
    "#;

    fn names(routes: &Routes<Stage>, scope: &str, path: &str) -> String {
        let (endpoint, _) = routes.match_route(scope, path);
        endpoint.map(|e| e.handler_path()).unwrap_or_default()
    }

    #[test]
    fn test_build_routes() {
        let manifest = parse_manifest(MANIFEST).unwrap();
        let routes = build_routes(&manifest).unwrap();

        assert_eq!(routes.len(), 2);
        assert_eq!(names(&routes, "GET", "/items"), "audit, log, list");
        assert_eq!(names(&routes, "GET", "/api/items/3"), "log, auth, get_item");

        let (endpoint, params) = routes.match_route("GET", "/api/items/3");
        let endpoint = endpoint.unwrap();
        assert!(endpoint.is_sensitive());
        assert_eq!(params["id"], "3");

        let (endpoint, _) = routes.match_route("GET", "/items");
        assert_eq!(endpoint.unwrap().description(), "List items");
    }

    #[test]
    fn test_sample_manifest() {
        let manifest = parse_manifest(include_str!("../../routes.toml")).unwrap();
        let routes = build_routes(&manifest).unwrap();

        assert_eq!(routes.len(), 6);
        assert_eq!(names(&routes, "DELETE", "/health"), "request_id, log, health");
        assert_eq!(names(&routes, "GET", "/static"), "request_id, log, static_files");
        assert_eq!(names(&routes, "GET", "/api/items"), "log, list_items");
        assert_eq!(names(&routes, "GET", "/api/admin/stats"), "log, auth, list_items");
    }

    #[test]
    fn test_conflict_surfaces_as_route_error() {
        let manifest = parse_manifest(
            r#"
            [[handlers]]
            name = "a"
            action = "reply"

            [[routes]]
            scope = "GET"
            path = "/items/{id}"
            handlers = ["a"]

            [[routes]]
            scope = "GET"
            path = "/items/{name}"
            handlers = ["a"]
            "#,
        )
        .unwrap();

        let err = build_routes(&manifest).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Route(RouteError::Conflict { ref scope, .. }) if scope == "GET"
        ));
    }

    #[test]
    fn test_duplicate_global_handler() {
        let manifest = parse_manifest(
            r#"
            use = ["log"]
            global = ["log"]

            [[handlers]]
            name = "log"
            action = "pass"
            "#,
        )
        .unwrap();

        let err = build_routes(&manifest).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Route(RouteError::DuplicateHandler { .. })
        ));
    }
}
