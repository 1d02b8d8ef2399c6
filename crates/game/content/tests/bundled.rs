//! The shipped demo content plays back deterministically.

use overworld_content::ContentFactory;
use overworld_core::verify_determinism;

#[test]
fn demo_recording_is_deterministic_on_bundled_worlds() {
    let factory = ContentFactory::bundled();
    let worlds = factory.load_worlds().expect("bundled worlds load");
    let config = factory.load_config().expect("bundled config loads");
    let recording = factory.load_recording("demo").expect("demo recording loads");

    let checkpoints = verify_determinism(&recording, &worlds, &config).expect("playbacks agree");
    assert_eq!(checkpoints.len(), recording.checkpoints.len());
}
