use barpng::*;

/// Pixels of a PNG decoded by the `png` crate, `true` where dark
struct Decoded {
    width: u32,
    height: u32,
    dark: Vec<bool>,
    info: png::Info<'static>,
}

impl Decoded {
    fn is_dark(&self, x: u32, y: u32) -> bool {
        self.dark[(y * self.width + x) as usize]
    }
}

#[track_caller]
fn decode(file: &[u8]) -> Decoded {
    let mut decoder = png::Decoder::new(file);
    decoder.set_transformations(png::Transformations::IDENTITY);
    let mut reader = decoder.read_info().unwrap();
    let mut buf = vec![0; reader.output_buffer_size()];
    let frame = reader.next_frame(&mut buf).unwrap();
    assert_eq!(frame.color_type, png::ColorType::Grayscale);
    assert_eq!(frame.bit_depth, png::BitDepth::One);
    assert!(!reader.info().interlaced);

    let mut dark = Vec::with_capacity((frame.width * frame.height) as usize);
    for line in buf.chunks(frame.line_size).take(frame.height as usize) {
        for x in 0..frame.width as usize {
            dark.push(line[x / 8] & (0x80 >> (x % 8)) == 0);
        }
    }
    Decoded {
        width: frame.width,
        height: frame.height,
        dark,
        info: reader.info().clone(),
    }
}

/// Checks that the matrix is at the top of the image, horizontally centered on a byte boundary
#[track_caller]
fn assert_matrix_matches(img: &Decoded, matrix: &BitMatrix) {
    let image_bytes = (img.width + 7) / 8;
    let matrix_bytes = (matrix.width() + 7) / 8;
    let left = (image_bytes - matrix_bytes) / 2 * 8;
    for y in 0..matrix.height() {
        for x in 0..img.width {
            let expected = x >= left && x < left + matrix.width() && matrix.get(x - left, y);
            assert_eq!(img.is_dark(x, y), expected, "pixel {x},{y} of {}x{}", matrix.width(), matrix.height());
        }
    }
}

fn randomize(data: &mut [u8]) {
    let mut seed = u32::from(data[0]);
    for b in data {
        seed = 1103515245u32.wrapping_mul(seed).wrapping_add(12345);
        *b ^= (seed >> 17) as u8;
    }
}

fn random_matrix(width: u32, height: u32, seed: u8) -> BitMatrix {
    let mut noise = vec![0u8; (width * height) as usize + 1];
    noise[0] = seed;
    randomize(&mut noise);
    let mut m = BitMatrix::new(width, height);
    for y in 0..height {
        for x in 0..width {
            if noise[(y * width + x) as usize + 1] & 1 != 0 {
                m.set(x, y);
            }
        }
    }
    m
}

#[test]
fn roundtrip_odd_width() {
    let m = random_matrix(21, 21, 7);
    let img = decode(&render(&m, "", false).unwrap());
    assert_eq!((img.width, img.height), (21, 21));
    assert_matrix_matches(&img, &m);
}

#[test]
fn roundtrip_identical_rows() {
    let row: String = (0..37).map(|x| if x % 3 == 0 { '#' } else { '.' }).collect();
    let m = BitMatrix::from_rows(&vec![row; 9]);
    let img = decode(&render(&m, "", false).unwrap());
    assert_eq!((img.width, img.height), (37, 9));
    assert_matrix_matches(&img, &m);
}

#[test]
fn roundtrip_random_sizes() {
    let mut seed = 0u8;
    for width in [1, 2, 7, 8, 9, 15, 31, 32, 33, 63, 64, 65, 100, 255, 256, 257] {
        for height in [1, 2, 3, 17] {
            seed = seed.wrapping_add(1);
            let m = random_matrix(width, height, seed);
            let img = decode(&render(&m, "", false).unwrap());
            assert_eq!((img.width, img.height), (width, height));
            assert_matrix_matches(&img, &m);
        }
    }
}

#[test]
fn roundtrip_solid_and_empty() {
    for (w, h) in [(1, 1), (8, 8), (33, 5)] {
        let empty = BitMatrix::new(w, h);
        let img = decode(&render(&empty, "", false).unwrap());
        assert!(!img.dark.iter().any(|&d| d));

        let mut solid = BitMatrix::new(w, h);
        solid.set_region(0, 0, w, h);
        let img = decode(&render(&solid, "", false).unwrap());
        assert!(img.dark.iter().all(|&d| d));
    }
}

#[test]
fn roundtrip_caption_wider_than_matrix() {
    // 13 characters make the image 104 pixels wide, the 21 pixel matrix spans 3 of its 13 bytes
    let text = "Hello, World!";
    let m = random_matrix(21, 21, 42);
    let img = decode(&render(&m, text, true).unwrap());
    assert_eq!((img.width, img.height), (104, 21 + 13));
    assert_matrix_matches(&img, &m);

    // blank line, glyphs, blank line
    let band = 21;
    assert!((0..104).all(|x| !img.is_dark(x, band)));
    assert!((0..104).all(|x| !img.is_dark(x, band + 12)));
    assert_caption_matches(&img, text, band);
}

/// Checks the 11 glyph rows under the blank row at `band`. Characters without a glyph stay white.
#[track_caller]
fn assert_caption_matches(img: &Decoded, text: &str, band: u32) {
    for (i, c) in text.chars().enumerate() {
        let glyph = caption::glyph(c);
        for gy in 0..11 {
            for gx in 0..8 {
                let x = i as u32 * 8 + gx;
                let y = band + 1 + gy as u32;
                let expected = match glyph {
                    Some(bits) => bits[gy] & (0x80 >> gx) == 0,
                    None => false,
                };
                assert_eq!(img.is_dark(x, y), expected, "{c:?} at {gx},{gy}");
            }
        }
    }
}

#[test]
fn roundtrip_caption_odd_margin() {
    // 4 bytes wide for a 1 byte matrix: 1 byte of margin on the left, 2 on the right
    let text = "\u{e9}\u{e9}\u{e9}x";
    let mut m = BitMatrix::new(5, 5);
    m.set_region(0, 0, 5, 5);
    let img = decode(&render(&m, text, true).unwrap());
    assert_eq!((img.width, img.height), (32, 5 + 13));
    assert_matrix_matches(&img, &m);
    assert!((0..5).all(|y| (0..8).chain(13..32).all(|x| !img.is_dark(x, y))));

    let band = 5;
    assert!((0..32).all(|x| !img.is_dark(x, band)));
    assert!((0..32).all(|x| !img.is_dark(x, band + 12)));
    assert_caption_matches(&img, text, band);
    assert!((24..32).any(|x| (band + 1..band + 12).any(|y| img.is_dark(x, y))));
    assert!((0..24).all(|x| (band..img.height).all(|y| !img.is_dark(x, y))));
}

#[test]
fn roundtrip_caption_over_blank_rows() {
    let mut m = BitMatrix::new(40, 30);
    m.set_region(5, 0, 30, 12);
    let img = decode(&render(&m, "ABC", true).unwrap());
    // 18 blank rows under the symbol, the caption takes the last 13 of them
    assert_eq!((img.width, img.height), (40, 30));
    let mut top = BitMatrix::new(40, 17);
    top.set_region(5, 0, 30, 12);
    assert_matrix_matches(&img, &top);
    let caption_top = 17;
    assert!((0..40).all(|x| !img.is_dark(x, caption_top)));
    assert!((0..40).any(|x| img.is_dark(x, caption_top + 1)));
}

#[test]
fn roundtrip_caption_grows_height() {
    let mut m = BitMatrix::new(24, 24);
    m.set_region(0, 0, 24, 20);
    let img = decode(&render(&m, "xyz", true).unwrap());
    // 4 blank rows reused, 9 added; the decoder checks the rewritten IHDR CRC
    assert_eq!((img.width, img.height), (24, 20 + 13));
    let mut top = BitMatrix::new(24, 20);
    top.set_region(0, 0, 24, 20);
    assert_matrix_matches(&img, &top);
    // the caption starts right under the symbol
    assert!((0..24).all(|x| !img.is_dark(x, 20)));
    assert!((0..24).any(|x| img.is_dark(x, 24)));
}

#[test]
fn roundtrip_text_chunks() {
    let text = TextualInformation::new()
        .with(Keyword::Title, "R\u{e9}sum\u{e9}")
        .with(Keyword::Description, TextData::new("squeezed ".repeat(20)).compressed(true))
        .with(Keyword::Comment, TextData::new("\u{263A}").utf8(true))
        .with(Keyword::Source, TextData::new("\u{263B}".repeat(30)).utf8(true).compressed(true));
    let options = RenderOptions {
        textual_information: Some(text),
        ..RenderOptions::default()
    };
    let m = random_matrix(17, 3, 1);
    let img = decode(&Renderer::with_options(options).render(&m, "").unwrap());
    assert_matrix_matches(&img, &m);

    let latin1 = &img.info.uncompressed_latin1_text;
    assert_eq!(latin1.len(), 1);
    assert_eq!(latin1[0].keyword, "Title");
    assert_eq!(latin1[0].text, "R\u{e9}sum\u{e9}");

    let compressed = &img.info.compressed_latin1_text;
    assert_eq!(compressed.len(), 1);
    assert_eq!(compressed[0].keyword, "Description");
    assert_eq!(compressed[0].get_text().unwrap(), "squeezed ".repeat(20));

    let utf8: Vec<_> = img.info.utf8_text.iter().map(|t| (t.keyword.as_str(), t.get_text().unwrap())).collect();
    assert_eq!(utf8, [("Source", "\u{263B}".repeat(30)), ("Comment", "\u{263A}".to_string())]);
}
