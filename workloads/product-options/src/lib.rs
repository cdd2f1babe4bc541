//! Product page with custom options.
//!
//! Routes:
//! - `GET /products/:handle?tags=a,b` renders the product form with the
//!   option set that applies to the product
//! - `POST /options/quote` returns the line properties and surcharge for a
//!   set of selections

mod catalog;
mod page;
mod quote;

use anyhow::Result;
use spin_sdk::http::{Method, Request, Response};
use spin_sdk::http_component;

use options_core::catalog::{OptionCatalog, OptionSetSource};
use options_observability::{LogFormat, LogLevel, RequestId, StructuredLogger};
use options_render::{OptionForm, RenderConfig};

/// A finished response, independent of the HTTP runtime.
#[derive(Debug)]
struct Reply {
    status: u16,
    content_type: &'static str,
    body: String,
}

impl Reply {
    fn html(status: u16, body: String) -> Self {
        Self {
            status,
            content_type: "text/html; charset=utf-8",
            body,
        }
    }

    fn json(status: u16, body: serde_json::Value) -> Self {
        Self {
            status,
            content_type: "application/json",
            body: body.to_string(),
        }
    }

    fn error(status: u16, message: impl Into<String>) -> Self {
        Self::json(status, serde_json::json!({ "error": message.into() }))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Verb {
    Get,
    Post,
    Other,
}

/// Main HTTP handler.
#[http_component]
fn handle(req: Request) -> Result<Response> {
    let request_id = RequestId::generate();
    let logger = StructuredLogger::new(request_id.clone())
        .with_component("product-options")
        .with_min_level(LogLevel::Debug)
        .with_format(LogFormat::Human);

    let verb = match req.method() {
        Method::Get => Verb::Get,
        Method::Post => Verb::Post,
        _ => Verb::Other,
    };

    logger
        .info_builder("request started")
        .field("path", req.path())
        .emit();

    let catalog = catalog::load()?;
    let reply = dispatch(
        verb,
        req.path(),
        req.query(),
        req.body(),
        &catalog,
        &RenderConfig::default(),
        &logger,
    );

    logger
        .info_builder("request complete")
        .field_i64("status", reply.status as i64)
        .emit();

    Ok(Response::builder()
        .status(reply.status)
        .header("content-type", reply.content_type)
        .header("x-request-id", request_id.to_string())
        .body(reply.body)
        .build())
}

fn dispatch(
    verb: Verb,
    path: &str,
    query: &str,
    body: &[u8],
    catalog: &OptionCatalog,
    config: &RenderConfig,
    logger: &StructuredLogger,
) -> Reply {
    match (verb, path) {
        (Verb::Get, path) if path.starts_with("/products/") => {
            let handle = path.trim_start_matches("/products/").trim_end_matches('/');
            if handle.is_empty() || handle.contains('/') {
                return Reply::html(404, "<h1>Not found</h1>".to_string());
            }
            product_page(handle, query, catalog, config, logger)
        }
        (Verb::Post, "/options/quote") => match quote::quote(catalog, config, body, logger) {
            Ok(Some(response)) => match serde_json::to_value(&response) {
                Ok(value) => Reply::json(200, value),
                Err(e) => Reply::error(500, e.to_string()),
            },
            Ok(None) => Reply::error(404, "no option set applies to this product"),
            Err(e) => {
                logger
                    .warn_builder("quote rejected")
                    .field("error", format!("{:#}", e))
                    .emit();
                Reply::error(400, format!("{:#}", e))
            }
        },
        (_, "/options/quote") => Reply::error(405, "method not allowed"),
        _ => Reply::html(404, "<h1>Not found</h1>".to_string()),
    }
}

fn product_page(
    handle: &str,
    query: &str,
    catalog: &OptionCatalog,
    config: &RenderConfig,
    logger: &StructuredLogger,
) -> Reply {
    let product = catalog::product_from_query(handle, query);
    let request_id = logger.request_id().to_string();

    let Some(set) = catalog.option_set_for(&product) else {
        logger
            .debug_builder("no option set for product")
            .field("handle", handle)
            .emit();
        return Reply::html(200, page::render_page(handle, None, &request_id));
    };

    match OptionForm::new(set, config).render(logger) {
        Ok(form) => Reply::html(200, page::render_page(handle, Some(&form), &request_id)),
        Err(e) => {
            // The page still sells the product without options.
            logger
                .error_builder("option form failed to render")
                .field("option_set", set.id.as_str())
                .field("error", e.to_string())
                .emit();
            Reply::html(200, page::render_page(handle, None, &request_id))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(verb: Verb, path: &str, query: &str, body: &[u8]) -> Reply {
        let catalog = catalog::load().unwrap();
        dispatch(
            verb,
            path,
            query,
            body,
            &catalog,
            &RenderConfig::default(),
            &StructuredLogger::quiet(),
        )
    }

    #[test]
    fn test_product_page_renders_tagged_set() {
        let reply = run(Verb::Get, "/products/signet-ring", "tags=engravable", b"");
        assert_eq!(reply.status, 200);
        assert!(reply.body.contains(r#"data-option-set="engraving""#));
        assert!(reply.body.contains("signet-ring"));
        assert_eq!(reply.body.matches("data-options-style").count(), 1);
    }

    #[test]
    fn test_product_page_falls_back_to_apply_to_all() {
        let reply = run(Verb::Get, "/products/mug", "", b"");
        assert!(reply.body.contains(r#"data-option-set="gift""#));
    }

    #[test]
    fn test_quote_route() {
        let reply = run(
            Verb::Post,
            "/options/quote",
            "",
            br#"{"selections": {"Gift wrap": "Yes", "Gift note": "Happy birthday"}}"#,
        );
        assert_eq!(reply.status, 200);
        let value: serde_json::Value = serde_json::from_str(&reply.body).unwrap();
        assert_eq!(value["optionSet"], "gift");
        assert_eq!(value["additionalPrice"], "1.00");
    }

    #[test]
    fn test_errors() {
        assert_eq!(run(Verb::Post, "/options/quote", "", b"{").status, 400);
        assert_eq!(run(Verb::Get, "/options/quote", "", b"").status, 405);
        assert_eq!(run(Verb::Get, "/nope", "", b"").status, 404);
        assert_eq!(run(Verb::Get, "/products/", "", b"").status, 404);
    }
}
