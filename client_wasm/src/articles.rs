//! Article list, fetched through the worker's proxy

use crate::dom;
use proto::{Article, ArticleQuery, ProxyResponse};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Element, Response};

const FALLBACK_TEXT: &str = "Articles are unavailable right now.";
const EMPTY_TEXT: &str = "No articles yet.";

/// Fill `container` with list items for the requested page.
///
/// Bad arguments are rejected; fetch or upstream failures render a fallback
/// message instead of failing the promise.
#[wasm_bindgen]
pub async fn load_articles(
    container: Element,
    order: Option<String>,
    page: Option<u32>,
) -> Result<(), JsValue> {
    let mut pairs = Vec::new();
    if let Some(order) = order {
        pairs.push(("order", order));
    }
    if let Some(page) = page {
        pairs.push(("page", page.to_string()));
    }
    let query = ArticleQuery::from_pairs(pairs).map_err(|e| JsValue::from_str(&e.to_string()))?;

    let path = query.proxy_path();
    let body = match fetch_text(&path).await {
        Ok(body) => body,
        Err(e) => {
            log::warn!("fetching {} failed: {:?}", path, e);
            return render_message(&container, FALLBACK_TEXT);
        }
    };

    match ProxyResponse::from_json(&body) {
        Ok(ProxyResponse::Articles(list)) if list.articles.is_empty() => {
            render_message(&container, EMPTY_TEXT)
        }
        Ok(ProxyResponse::Articles(list)) => {
            log::info!("loaded {} articles", list.articles.len());
            render_list(&container, &list.articles)
        }
        Ok(ProxyResponse::Error(error)) => {
            log::warn!("article proxy error: {}", error.error);
            render_message(&container, FALLBACK_TEXT)
        }
        Err(e) => {
            log::warn!("unreadable article payload: {}", e);
            render_message(&container, FALLBACK_TEXT)
        }
    }
}

async fn fetch_text(path: &str) -> Result<String, JsValue> {
    let window = crate::window()?;
    let response: Response = JsFuture::from(window.fetch_with_str(path))
        .await?
        .dyn_into()?;
    let text = JsFuture::from(response.text()?).await?;
    text.as_string()
        .ok_or_else(|| JsValue::from_str("Response body is not text"))
}

fn render_list(container: &Element, articles: &[Article]) -> Result<(), JsValue> {
    let document = dom::document()?;
    container.set_inner_html("");

    for article in articles {
        let item = document.create_element("li")?;
        let label = format!("{} {}", article.emoji, article.title);
        let title = match article.url() {
            Some(url) => {
                let link = document.create_element("a")?;
                link.set_attribute("href", &url)?;
                link.set_attribute("target", "_blank")?;
                link.set_attribute("rel", "noopener")?;
                link
            }
            None => document.create_element("span")?,
        };
        title.set_text_content(Some(label.trim()));
        item.append_child(&title)?;

        let likes = document.create_element("span")?;
        likes.set_class_name("likes");
        likes.set_text_content(Some(&format!(" ♥ {}", article.liked_count)));
        item.append_child(&likes)?;

        container.append_child(&item)?;
    }
    Ok(())
}

fn render_message(container: &Element, text: &str) -> Result<(), JsValue> {
    let item = dom::document()?.create_element("li")?;
    item.set_class_name("fallback");
    item.set_text_content(Some(text));
    container.set_inner_html("");
    container.append_child(&item)?;
    Ok(())
}
