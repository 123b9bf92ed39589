// Path trie with per-method handler dispatch.
use ic_http_certification::{HttpResponse, Method};
use std::collections::HashMap;

use crate::context::RouteContext;

pub type HandlerFn = fn(RouteContext) -> HttpResponse<'static>;

/// Result of resolving a path + method against the route tree.
pub enum RouteResult {
    /// A handler was found for the given path and method.
    Found(HandlerFn),
    /// The path exists but the requested method is not registered.
    /// Contains the list of methods that *are* registered for this path.
    MethodNotAllowed(Vec<Method>),
    /// No route matches the given path.
    NotFound,
}

pub struct RouteNode {
    pub segment: String,
    pub children: Vec<RouteNode>,
    pub handlers: HashMap<Method, HandlerFn>,
}

impl RouteNode {
    pub fn new(segment: impl Into<String>) -> Self {
        Self {
            segment: segment.into(),
            children: Vec::new(),
            handlers: HashMap::new(),
        }
    }

    pub fn insert(&mut self, path: &str, method: Method, handler: HandlerFn) {
        let segments: Vec<_> = path.split('/').filter(|s| !s.is_empty()).collect();
        self._insert(&segments, method, handler);
    }

    fn _insert(&mut self, segments: &[&str], method: Method, handler: HandlerFn) {
        let Some((head, tail)) = segments.split_first() else {
            self.handlers.insert(method, handler);
            return;
        };

        match self.children.iter_mut().find(|c| c.segment == *head) {
            Some(c) => c._insert(tail, method, handler),
            None => {
                let mut new_node = RouteNode::new(*head);
                new_node._insert(tail, method, handler);
                self.children.push(new_node);
            }
        }
    }

    /// Resolve a path and method to a `RouteResult`.
    ///
    /// 1. Finds the trie node matching `path`.
    /// 2. If found, looks up `method` in the node's `handlers` map.
    /// 3. Returns `Found` / `MethodNotAllowed` / `NotFound` accordingly.
    pub fn resolve(&self, path: &str, method: &Method) -> RouteResult {
        let segments: Vec<_> = path.split('/').filter(|s| !s.is_empty()).collect();
        debug_log!("resolve: {} {}", method.as_str(), path);
        match self._match(&segments) {
            Some(handlers) => {
                if let Some(&handler) = handlers.get(method) {
                    RouteResult::Found(handler)
                } else {
                    let mut allowed: Vec<Method> = handlers.keys().cloned().collect();
                    allowed.sort_by(|a, b| a.as_str().cmp(b.as_str()));
                    RouteResult::MethodNotAllowed(allowed)
                }
            }
            None => RouteResult::NotFound,
        }
    }

    fn _match(&self, segments: &[&str]) -> Option<&HashMap<Method, HandlerFn>> {
        let Some((head, tail)) = segments.split_first() else {
            return (!self.handlers.is_empty()).then_some(&self.handlers);
        };

        self.children
            .iter()
            .find(|c| c.segment == *head)
            .and_then(|c| c._match(tail))
    }
}
