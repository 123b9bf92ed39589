//! Skip certification for freshly generated responses.
//!
//! IC boundary nodes only pass through a query response when it carries a
//! certificate proving what the canister intended. A card is rendered anew
//! on every request and must never be cached, so instead of certifying its
//! body the canister certifies that *every* path is deliberately
//! uncertified: a single skip entry under the wildcard path `/` is inserted
//! into the certification tree at setup, and each response carries a
//! witness for that entry.
//!
//! Skip certification gives the same trust level as a candid query call.
//! The gateway does not verify the body, which suits a decorative image.

use ic_http_certification::{
    utils::add_v2_certificate_header, HttpCertification, HttpCertificationPath,
    HttpCertificationTree, HttpCertificationTreeEntry, HttpResponse,
};

/// Reasons a response could not be given its certification proof.
#[derive(Debug, thiserror::Error)]
pub enum CertificationError {
    /// `data_certificate()` is only available in query calls.
    #[error("no data certificate available")]
    NoDataCertificate,
    #[error("failed to create certification witness: {0}")]
    Witness(String),
}

fn skip_path() -> HttpCertificationPath<'static> {
    HttpCertificationPath::wildcard("/")
}

/// Insert the wildcard skip entry. Inserting it twice is harmless.
pub fn insert_skip_certification(tree: &mut HttpCertificationTree) {
    let path = skip_path();
    let entry = HttpCertificationTreeEntry::new(&path, HttpCertification::skip());
    tree.insert(&entry);
}

/// Attach the `IC-Certificate` header proving that `request_path` is covered
/// by the skip entry.
pub fn attach_skip_certificate(
    tree: &HttpCertificationTree,
    data_certificate: &[u8],
    request_path: &str,
    response: &mut HttpResponse<'static>,
) -> Result<(), CertificationError> {
    let path = skip_path();
    let entry = HttpCertificationTreeEntry::new(&path, HttpCertification::skip());
    let witness = tree
        .witness(&entry, request_path)
        .map_err(|e| CertificationError::Witness(e.to_string()))?;
    add_v2_certificate_header(data_certificate, response, &witness, &path.to_expr_path());
    Ok(())
}
