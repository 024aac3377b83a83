#![no_main]
use bmp2raw::{ConvertRequest, Limits, Rotation};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let limits = Limits {
        max_pixels: Some(1 << 20),
        ..Default::default()
    };
    let convert = |rotation| {
        ConvertRequest::new(data)
            .rotation(rotation)
            .limits(&limits)
            .convert(enough::Unstoppable)
    };

    let Ok(upright) = convert(Rotation::None) else {
        return;
    };
    assert_eq!(
        upright.pixels().len(),
        upright.width as usize * upright.height as usize
    );

    // A half turn reverses the row-major stream
    let half = convert(Rotation::Rotate180).expect("half turn of a decodable image");
    let mut reversed = upright.pixels().to_vec();
    reversed.reverse();
    assert_eq!(half.pixels(), reversed.as_slice());

    // Quarter turns swap the axes and mirror each other
    let cw = convert(Rotation::Rotate90).expect("quarter turn of a decodable image");
    let ccw = convert(Rotation::Rotate270).expect("quarter turn of a decodable image");
    assert_eq!((cw.width, cw.height), (upright.height, upright.width));
    let mut mirrored = cw.pixels().to_vec();
    mirrored.reverse();
    assert_eq!(ccw.pixels(), mirrored.as_slice());
});
