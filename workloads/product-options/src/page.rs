//! Product page shell around the option form.

use options_render::{html_escape, Fragment};

/// Render the product page. `options` is `None` when no option set applies.
pub fn render_page(handle: &str, options: Option<&Fragment>, request_id: &str) -> String {
    let title = html_escape(handle);
    let options = match options {
        Some(fragment) => fragment.to_string(),
        None => r#"<p class="no-options">This product has no custom options.</p>"#.to_string(),
    };

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="utf-8">
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <title>{title} | Store</title>
    <style>{styles}</style>
</head>
<body>
    <header class="site-header">
        <nav><a href="/">Home</a> / <a href="/products">Products</a> / {title}</nav>
    </header>
    <main class="pdp-container">
        <p class="request-info">Request ID: {request_id}</p>
        <h1 class="product-name">{title}</h1>
        <form class="product-form" action="/cart/add" method="post">
            {options}
            <button type="submit" class="btn-add-to-cart">Add to cart</button>
        </form>
    </main>
</body>
</html>"#,
        title = title,
        styles = PAGE_STYLES,
        request_id = html_escape(request_id),
        options = options,
    )
}

const PAGE_STYLES: &str = r#"
* { box-sizing: border-box; }
body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif; margin: 0; padding: 0; background: #f5f5f5; }
.site-header { background: #333; color: white; padding: 1rem 2rem; }
.site-header a { color: #88f; }
.pdp-container { max-width: 720px; margin: 0 auto; padding: 2rem; }
.request-info { font-size: 0.75rem; color: #666; }
.product-form { background: white; padding: 2rem; border-radius: 8px; display: flex; flex-direction: column; gap: 1.5rem; }
.btn-add-to-cart { background: #ff9900; border: none; padding: 1rem 2rem; font-size: 1rem; border-radius: 8px; cursor: pointer; }
"#;
