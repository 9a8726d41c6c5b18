use anyhow::{Context, anyhow};
use esp_idf_svc::http::Method as EspMethod;
use esp_idf_svc::http::server::{Configuration, EspHttpConnection, EspHttpServer, Request};
use esp_idf_svc::io::Write;
use klima::config::HTTP_PORT;
use klima::http::{Method, SharedService};
use klima::station::ReadingSource;

// Every method goes through the router so unknown routes get our 404 body
// instead of the httpd default.
const ROUTED_METHODS: [EspMethod; 6] = [
    EspMethod::Get,
    EspMethod::Head,
    EspMethod::Post,
    EspMethod::Put,
    EspMethod::Delete,
    EspMethod::Patch,
];

pub(crate) fn start<S>(service: SharedService<S>) -> anyhow::Result<EspHttpServer<'static>>
where
    S: ReadingSource + Send + 'static,
{
    let config = Configuration {
        http_port: HTTP_PORT,
        uri_match_wildcard: true,
        ..Default::default()
    };
    let mut server = EspHttpServer::new(&config).context("Failed to create HTTP server")?;

    for method in ROUTED_METHODS {
        let service = service.clone();
        server
            .fn_handler::<anyhow::Error, _>("/*", method, move |req| {
                respond(&service, method, req)
            })
            .with_context(|| format!("Failed to register {:?} handler", method))?;
    }

    Ok(server)
}

fn respond<S: ReadingSource>(
    service: &SharedService<S>,
    method: EspMethod,
    req: Request<&mut EspHttpConnection<'_>>,
) -> anyhow::Result<()> {
    let response = {
        let mut service = service
            .lock()
            .map_err(|_| anyhow!("status service lock poisoned"))?;
        service.handle(route_method(method), req.uri())
    };

    req.into_response(
        response.status,
        None,
        &[("Content-Type", response.content_type)],
    )?
    .write_all(&response.body)?;
    Ok(())
}

fn route_method(method: EspMethod) -> Method {
    match method {
        EspMethod::Get => Method::Get,
        EspMethod::Head => Method::Head,
        EspMethod::Post => Method::Post,
        EspMethod::Put => Method::Put,
        EspMethod::Delete => Method::Delete,
        EspMethod::Patch => Method::Patch,
        _ => Method::Other,
    }
}
