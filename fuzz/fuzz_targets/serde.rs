#![no_main]

use cardinality_sketch::HyperLogLog;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(sketch) = serde_json::from_slice::<HyperLogLog>(data) {
        assert!(sketch.precision() >= 4);
        let _ = sketch.count();
    }
});
