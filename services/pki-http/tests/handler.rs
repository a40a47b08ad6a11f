use crate::{Fixture, FIELDS};
use alvarium_core::time::from_unix_seconds;
use alvarium_core::{ErrorKind, KeyInfo, SignType, SignatureInfo};
use alvarium_pki_http::{
    request_handler, signature_base, Ed25519RequestHandler, RequestHandler, SignatureInput,
    SIGNATURE, SIGNATURE_INPUT,
};
use anyhow::Result;
use pretty_assertions::assert_eq;

#[test]
fn test_add_signature_headers_wire_format() -> Result<()> {
    let f = Fixture::ed25519();
    let mut req = f.unsigned_request();

    Ed25519RequestHandler.add_signature_headers(
        &f.ctx,
        &mut req,
        from_unix_seconds(1646146637)?,
        &FIELDS,
        &f.sig,
    )?;

    assert_eq!(
        req.headers()[SIGNATURE_INPUT].to_str()?,
        "\"@method\" \"@path\" \"@authority\" \"Content-Type\" \"Content-Length\";created=1646146637;keyid=\"public.key\";alg=\"ed25519\""
    );
    let signature = alvarium_core::hash::base64_decode(req.headers()[SIGNATURE].to_str()?)?;
    assert_eq!(signature.len(), 64);
    Ok(())
}

#[test]
fn test_verify_roundtrip() -> Result<()> {
    let f = Fixture::ed25519();
    let req = f.request();

    assert!(request_handler(SignType::Ed25519).verify(&f.ctx, &req, &f.sig)?);
    Ok(())
}

#[test]
fn test_signing_is_deterministic_for_ed25519() -> Result<()> {
    let f = Fixture::ed25519();
    let created = from_unix_seconds(1646146637)?;

    let mut a = f.unsigned_request();
    let mut b = f.unsigned_request();
    Ed25519RequestHandler.add_signature_headers(&f.ctx, &mut a, created, &FIELDS, &f.sig)?;
    Ed25519RequestHandler.add_signature_headers(&f.ctx, &mut b, created, &FIELDS, &f.sig)?;

    assert_eq!(a.headers()[SIGNATURE], b.headers()[SIGNATURE]);
    Ok(())
}

#[test]
fn test_signature_base_of_signed_request() -> Result<()> {
    let f = Fixture::ed25519();
    let req = f.request();

    let input = SignatureInput::parse(req.headers()[SIGNATURE_INPUT].to_str()?)?;
    let base = signature_base(&req, &input)?;

    let lines: Vec<&str> = base.lines().collect();
    assert_eq!(lines.len(), FIELDS.len() + 1);
    assert_eq!(lines[0], "\"@method\": POST");
    assert_eq!(lines[1], "\"@path\": /foo");
    assert_eq!(lines[2], "\"@authority\": example.com");
    assert_eq!(lines[3], "\"Content-Type\": application/json");
    assert_eq!(lines[4], "\"Content-Length\": 18");
    assert!(lines[5].starts_with("\"@signature-params\": \"@method\""));
    Ok(())
}

#[test]
fn test_missing_private_key() {
    let f = Fixture::ed25519();
    let sig = SignatureInfo::new(
        f.sig.public.clone(),
        KeyInfo::new("/definitely/not/here.key", SignType::Ed25519),
    );
    let mut req = f.unsigned_request();

    let err = Ed25519RequestHandler
        .add_signature_headers(&f.ctx, &mut req, alvarium_core::time::now(), &FIELDS, &sig)
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ConfigInvalid);
    assert_eq!(err.to_string(), "Failed to load private key");
    assert!(req.headers().get(SIGNATURE).is_none());
}

#[test]
fn test_private_key_of_other_algorithm() {
    let f = Fixture::rsa();
    let mut req = f.unsigned_request();

    let err = Ed25519RequestHandler
        .add_signature_headers(&f.ctx, &mut req, alvarium_core::time::now(), &FIELDS, &f.sig)
        .unwrap_err();
    assert_eq!(err.to_string(), "Invalid key type rsa-v1_5-sha256");
}

#[test]
fn test_key_id_cannot_escape_key_directory() -> Result<()> {
    let f = Fixture::ed25519();
    let mut req = f.request();
    let input = SignatureInput::parse(req.headers()[SIGNATURE_INPUT].to_str()?)?;
    let escaped = SignatureInput::new(
        input.components().to_vec(),
        from_unix_seconds(input.created())?,
        "../public.key",
        input.alg(),
    );
    req.headers_mut()
        .insert(SIGNATURE_INPUT, escaped.as_str().parse()?);

    let err = Ed25519RequestHandler
        .verify(&f.ctx, &req, &f.sig)
        .unwrap_err();
    assert_eq!(err.to_string(), "Failed to load public key");
    Ok(())
}

#[test]
fn test_missing_covered_header() -> Result<()> {
    let f = Fixture::ed25519();
    let mut req = f.request();
    req.headers_mut().remove("Content-Length");

    assert!(!Ed25519RequestHandler.verify(&f.ctx, &req, &f.sig)?);
    Ok(())
}
