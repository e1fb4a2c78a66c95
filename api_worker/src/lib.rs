use worker::*;

mod page;
pub mod proxy;


use proxy::{ProxyConfig, ProxyReply, Upstream};

#[event(fetch)]
pub async fn main(req: Request, env: Env, _ctx: worker::Context) -> Result<Response> {
    let router = Router::new();

    router
        .get("/", handle_index)
        .get_async(proto::PROXY_PATH, handle_articles)
        .options(proto::PROXY_PATH, handle_preflight)
        .run(req, env)
        .await
}

fn handle_index(_req: Request, _ctx: RouteContext<()>) -> Result<Response> {
    Response::from_html(page::INDEX_HTML)
}

fn handle_preflight(_req: Request, _ctx: RouteContext<()>) -> Result<Response> {
    into_response(proxy::preflight())
}

async fn handle_articles(req: Request, ctx: RouteContext<()>) -> Result<Response> {
    let config = ProxyConfig::new(
        ctx.env.var("ZENN_USERNAME").ok().map(|v| v.to_string()),
        ctx.env.var("ZENN_API_BASE").ok().map(|v| v.to_string()),
    );
    let url = req.url()?;

    let reply = proxy::forward(url.query_pairs(), &config, &FetchUpstream).await;
    if reply.is_success() {
        console_log!("Proxy: {} -> {}", url.path(), reply.status);
    } else {
        console_error!("Proxy: {} failed: {} {}", url.path(), reply.status, reply.body);
    }
    into_response(reply)
}

/// Upstream fetch through the Workers runtime
struct FetchUpstream;

impl Upstream for FetchUpstream {
    async fn get(&self, url: &Url) -> std::result::Result<(u16, String), String> {
        let mut headers = Headers::new();
        headers
            .set("Accept", "application/json")
            .map_err(|e| e.to_string())?;

        let mut init = RequestInit::new();
        init.with_method(Method::Get).with_headers(headers);

        let request = Request::new_with_init(url.as_str(), &init).map_err(|e| e.to_string())?;
        let mut response = Fetch::Request(request)
            .send()
            .await
            .map_err(|e| e.to_string())?;

        let status = response.status_code();
        let body = response.text().await.map_err(|e| e.to_string())?;
        Ok((status, body))
    }
}

fn into_response(reply: ProxyReply) -> Result<Response> {
    let mut headers = Headers::new();
    for (name, value) in &reply.headers {
        headers.set(name, value)?;
    }

    // Null-body statuses must not carry a body
    let response = if reply.body.is_empty() {
        Response::empty()?
    } else {
        Response::ok(reply.body)?
    };
    Ok(response.with_status(reply.status).with_headers(headers))
}
