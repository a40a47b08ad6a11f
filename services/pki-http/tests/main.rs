use alvarium_core::time::now;
use alvarium_core::{Context, KeyInfo, SignType, SignatureInfo, StaticEnv};
use alvarium_file_read_std::StdFileRead;
use alvarium_pki_http::request_handler;
use bytes::Bytes;
use ed25519_dalek::SigningKey;
use rsa::pkcs8::{EncodePrivateKey, EncodePublicKey, LineEnding};
use rsa::{RsaPrivateKey, RsaPublicKey};
use std::collections::HashMap;
use std::path::Path;
use tempfile::TempDir;

mod handler;

/// Components covered by the signer in every test.
pub const FIELDS: [&str; 5] = [
    "@method",
    "@path",
    "@authority",
    "Content-Type",
    "Content-Length",
];

/// Key pair on disk plus a context able to read it.
pub struct Fixture {
    _dir: TempDir,
    pub ctx: Context,
    pub sig: SignatureInfo,
}

impl Fixture {
    fn new(sign_type: SignType, public: &[u8], private: &[u8]) -> Self {
        let _ = env_logger::builder().is_test(true).try_init();

        let dir = tempfile::tempdir().expect("tempdir must be created");
        let write = |name: &str, content: &[u8]| -> String {
            let path = dir.path().join(name);
            std::fs::write(&path, content).expect("key must be written");
            path_str(&path)
        };

        let sig = SignatureInfo::new(
            KeyInfo::new(write("public.key", public), sign_type),
            KeyInfo::new(write("private.key", private), sign_type),
        );
        let ctx = Context::new()
            .with_file_read(StdFileRead)
            .with_env(StaticEnv {
                envs: HashMap::from([("HOSTNAME".to_string(), "test-host".to_string())]),
            });

        Self {
            _dir: dir,
            ctx,
            sig,
        }
    }

    /// Ed25519 keys stored as hex text.
    pub fn ed25519() -> Self {
        let sk = SigningKey::from_bytes(&rand::random::<[u8; 32]>());
        Self::new(
            SignType::Ed25519,
            hex::encode(sk.verifying_key().as_bytes()).as_bytes(),
            hex::encode(sk.to_bytes()).as_bytes(),
        )
    }

    /// RSA keys stored as SPKI / PKCS#8 PEM.
    pub fn rsa() -> Self {
        let private = RsaPrivateKey::new(&mut rand::thread_rng(), 1024).expect("keygen");
        let public = RsaPublicKey::from(&private);
        Self::new(
            SignType::RsaSha256,
            public
                .to_public_key_pem(LineEnding::LF)
                .expect("pem")
                .as_bytes(),
            private.to_pkcs8_pem(LineEnding::LF).expect("pem").as_bytes(),
        )
    }

    /// An unsigned request shaped like the ones pipelines send.
    pub fn unsigned_request(&self) -> http::Request<Bytes> {
        http::Request::post("http://example.com/foo?var1=&var2=2")
            .header("Date", "Tue, 01 Mar 2022 14:57:17 GMT")
            .header("Content-Type", "application/json")
            .header("Content-Length", "18")
            .body(Bytes::from_static(b"{key: \"test\"}"))
            .expect("request must be valid")
    }

    /// A request signed over [`FIELDS`] with the fixture's private key.
    pub fn request(&self) -> http::Request<Bytes> {
        let mut req = self.unsigned_request();
        request_handler(self.sig.private.sign_type)
            .add_signature_headers(&self.ctx, &mut req, now(), &FIELDS, &self.sig)
            .expect("request must be signed");
        req
    }
}

fn path_str(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}

/// Replace header `name` on `req`.
pub fn set_header(req: &mut http::Request<Bytes>, name: &'static str, value: &str) {
    req.headers_mut()
        .insert(name, value.parse().expect("header value must be valid"));
}
