use alvarium_core::{
    Annotation, AnnotationType, Annotator, Context, HashProvider, HashProviderFactory, HashType,
    OsEnv, PropertyBag, Result,
};
use std::sync::Arc;

// A hash provider that only keeps the length, for demo purposes.
#[derive(Debug)]
struct LengthProvider;

impl HashProvider for LengthProvider {
    fn derive(&self, content: &[u8]) -> String {
        format!("LEN-{}", content.len())
    }
}

// An annotator that is satisfied when the caller sent a checksum matching
// the data.
#[derive(Debug)]
struct ChecksumAnnotator {
    ctx: Context,
    hasher: Arc<dyn HashProvider>,
}

impl Annotator for ChecksumAnnotator {
    fn execute(&self, bag: &PropertyBag, data: &[u8]) -> Result<Annotation> {
        let hash = self.hasher.derive(data);
        let expected = bag.text(AnnotationType::Checksum)?;

        Ok(Annotation::new(
            AnnotationType::Checksum,
            hash.clone(),
            self.ctx.host_id(),
            expected == hash,
        ))
    }
}

fn main() -> Result<()> {
    let ctx = Context::new().with_env(OsEnv);

    // Swap the built-in sha256 provider for our own.
    let factory = HashProviderFactory::new().register(HashType::SHA256Hash, LengthProvider);
    let annotator = ChecksumAnnotator {
        ctx,
        hasher: factory.get_provider(HashType::SHA256Hash)?,
    };

    let bag = PropertyBag::builder()
        .with(AnnotationType::Checksum, "LEN-7".to_string())
        .build();
    let annotation = annotator.execute(&bag, b"foo bar")?;

    println!("{}", annotation.to_json()?);
    Ok(())
}
