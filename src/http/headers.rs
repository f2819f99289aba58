//! HTTP headers abstraction for [`HttpResponse`](crate::http::response::HttpResponse)
//!
//! Headers are stored in an ordered map to preserve insertion order, so a
//! response is always serialized with its headers in the order they were set.
//! Both header names and values are stored as raw strings, without validation
//! or restrictions on which headers are allowed.
//!
//! Higher-level types such as [`HttpResponse`](crate::http::response::HttpResponse)
//! constrain which names can be set by wrapping this structure.

use indexmap::IndexMap;

#[derive(Debug, Default)]
pub struct HttpHeaders {
    headers: IndexMap<String, String>,
}

impl HttpHeaders {
    pub fn new() -> Self {
        Self {
            headers: IndexMap::new(),
        }
    }

    pub fn set_raw(&mut self, name: &str, value: &str) {
        self.headers.insert(name.to_string(), value.to_string());
    }

    pub fn get(&self, name: &str) -> Option<&String> {
        self.headers.get(name)
    }

    pub fn stringify(&self) -> String {
        let mut result = String::new();
        for (name, value) in &self.headers {
            result.push_str(&format!("{}: {}\r\n", name, value));
        }
        result
    }
}
