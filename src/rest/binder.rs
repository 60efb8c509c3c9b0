//! Route tree compiler.
//!
//! # Responsibilities
//! - Derive collection (`/<name>`) and member (`/<name>/<id>`) paths
//! - Register one binding per verb, named `<name>:<tag>`
//! - Wrap every binding of a node in that node's middleware
//! - Nest children under the parent's member path
//!
//! # Design Decisions
//! - Depth-first, input order is registration order
//! - Each recursion gets its own prefix; siblings never see each other's segments
//! - Templates are not validated here; the mux rejects malformed ones
//! - Duplicate sibling names are not detected

use std::sync::Arc;

use axum::extract::Request;

use crate::rest::handler::{RestHandler, Scope, Verb};
use crate::rest::route::Route;
use crate::routing::{BoxResponseFuture, HandlerFn, Mux, MuxError};

/// Build a new [`Mux`] holding the bindings of `routes`.
pub fn get_router<S: AsRef<str>>(routes: &[Route], parent: &[S]) -> Result<Mux, MuxError> {
    let mut mux = Mux::new();
    apply_routes(&mut mux, routes, parent)?;
    Ok(mux)
}

/// Register the bindings of `routes` on `mux`.
///
/// `parent` holds the path segments every route is nested under. An empty
/// slice, or `[""]`, is the root: the resource `foo` lands on `/foo`.
/// `["", "v1"]` would put it on `/v1/foo`.
pub fn apply_routes<S: AsRef<str>>(
    mux: &mut Mux,
    routes: &[Route],
    parent: &[S],
) -> Result<(), MuxError> {
    let prefix: Vec<String> = if parent.is_empty() {
        vec![String::new()]
    } else {
        parent.iter().map(|s| s.as_ref().to_string()).collect()
    };
    bind(mux, routes, &prefix)
}

fn bind(mux: &mut Mux, routes: &[Route], prefix: &[String]) -> Result<(), MuxError> {
    for route in routes {
        let mw = route.effective_middleware();

        let mut collection = prefix.to_vec();
        collection.push(route.name().to_string());
        let mut member = collection.clone();
        member.push(route.id_pattern().to_string());

        let collection_path = collection.join("/");
        let member_path = member.join("/");

        for verb in Verb::ALL {
            let path = match verb.scope() {
                Scope::Collection => &collection_path,
                Scope::Member => &member_path,
            };
            let name = format!("{}:{}", route.name(), verb.tag());
            tracing::debug!(
                route = %name,
                method = %verb.method(),
                path = %path,
                "Binding route"
            );
            mux.handle(
                verb.method(),
                path,
                name,
                mw.wrap(verb_handler(route.handler(), verb)),
            )?;
        }

        if !route.children().is_empty() {
            bind(mux, route.children(), &member)?;
        }
    }
    Ok(())
}

fn verb_handler(handler: &Arc<dyn RestHandler>, verb: Verb) -> HandlerFn {
    let handler = Arc::clone(handler);
    Arc::new(move |req: Request| -> BoxResponseFuture {
        let handler = Arc::clone(&handler);
        Box::pin(async move { verb.dispatch(&*handler, req).await })
    })
}
