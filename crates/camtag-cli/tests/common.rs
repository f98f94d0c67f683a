#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use httptest::{matchers::*, responders::*, Expectation, Server};
use serde_json::{json, Value};
use tempfile::TempDir;

pub const SIGNED_CLAIM: &str = r#"{"camliVersion":1,"camliType":"claim","camliSig":"c2ln"}"#;

pub fn workspace_with_file(name: &str, size: usize) -> (TempDir, PathBuf) {
    let temp = tempfile::Builder::new()
        .prefix("camtag-cli")
        .tempdir()
        .expect("tempdir");
    let path = temp.path().join(name);
    fs::write(&path, vec![b'x'; size]).expect("write file");
    (temp, path)
}

pub fn server_url(server: &Server) -> String {
    server.url_str("/")
}

pub fn expect_discovery(server: &Server) {
    server.expect(
        Expectation::matching(request::method_path("GET", "/")).respond_with(json_encoded(
            json!({
                "blobRoot": "/bs/",
                "searchRoot": "/my-search/",
                "signing": {
                    "publicKeyBlobRef": "sha224-key",
                    "signHandler": "/sighelper/camli/sig/sign"
                }
            }),
        )),
    );
}

/// Answers the file-name lookup for `name`/`size` with `blobs`.
pub fn expect_file_search(server: &Server, name: &str, size: u64, blobs: &[&str]) {
    server.expect(
        Expectation::matching(all_of![
            request::method_path("POST", "/my-search/camli/search/query"),
            request::body(json_decoded(eq(json!({
                "constraint": {
                    "file": {
                        "filename": {"equals": name},
                        "filesize": {"min": size, "max": size}
                    }
                }
            })))),
        ])
        .respond_with(json_encoded(search_result(blobs))),
    );
}

/// Answers the `camliContent` lookup for `blob` with `nodes`.
pub fn expect_content_search(server: &Server, blob: &str, nodes: &[&str]) {
    server.expect(
        Expectation::matching(all_of![
            request::method_path("POST", "/my-search/camli/search/query"),
            request::body(json_decoded(eq(json!({
                "constraint": {
                    "permanode": {"attr": "camliContent", "value": blob}
                }
            })))),
        ])
        .respond_with(json_encoded(search_result(nodes))),
    );
}

pub fn expect_describe(server: &Server, node: &str, meta: Value) {
    server.expect(
        Expectation::matching(all_of![
            request::method_path("GET", "/my-search/camli/search/describe"),
            request::query(url_decoded(contains(("blobref", eq(node.to_string()))))),
        ])
        .respond_with(json_encoded(json!({ "meta": meta }))),
    );
}

pub fn permanode_meta(node: &str, tags: &[&str]) -> Value {
    json!({
        node: {
            "blobRef": node,
            "camliType": "permanode",
            "permanode": {"attr": {"camliContent": ["sha224-b1"], "tag": tags}}
        }
    })
}

/// Expects `count` sign + upload round trips.
pub fn expect_mutations(server: &Server, count: usize) {
    let claim = camtag_domain::BlobRef::sha224(SIGNED_CLAIM.as_bytes());
    server.expect(
        Expectation::matching(all_of![
            request::method_path("POST", "/sighelper/camli/sig/sign"),
            request::body(url_decoded(contains(key("json")))),
        ])
        .times(count)
        .respond_with(status_code(200).body(SIGNED_CLAIM)),
    );
    server.expect(
        Expectation::matching(request::method_path("POST", "/bs/camli/upload"))
            .times(count)
            .respond_with(json_encoded(json!({
                "received": [{"blobRef": claim.as_str(), "size": SIGNED_CLAIM.len()}]
            }))),
    );
}

fn search_result(blobs: &[&str]) -> Value {
    if blobs.is_empty() {
        return json!({});
    }
    let entries: Vec<Value> = blobs.iter().map(|blob| json!({ "blob": blob })).collect();
    json!({ "blobs": entries })
}

pub fn file_name(path: &Path) -> String {
    path.file_name()
        .and_then(|name| name.to_str())
        .expect("utf-8 file name")
        .to_string()
}
