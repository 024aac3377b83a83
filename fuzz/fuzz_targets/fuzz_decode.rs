#![no_main]
use bmp2raw::{ConvertRequest, DeviceResolution, Limits, Rotation};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let limits = Limits {
        max_pixels: Some(1 << 22),
        ..Default::default()
    };

    // Must never panic
    let _ = bmp2raw::probe(data);
    for degrees in [0, 90, 180, 270] {
        let request = ConvertRequest::new(data)
            .rotation(Rotation::from_degrees(degrees))
            .limits(&limits);
        let _ = request.convert(enough::Unstoppable);

        // Clipped to a small panel
        let clipped = request.device_resolution(DeviceResolution::new(7, 5));
        if let Ok(conversion) = clipped.prepare() {
            for px in conversion.pixels() {
                if px.is_err() {
                    break;
                }
            }
        }
    }
});
