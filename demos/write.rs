use barpng::{BitMatrix, Keyword, RenderOptions, Renderer, TextData, TextualInformation};
use std::path::Path;

/// Draws a QR-style finder pattern with its top left corner at `x`, `y`
fn finder(m: &mut BitMatrix, x: u32, y: u32) {
    m.set_region(x, y, 7, 7);
    for i in 1..6 {
        m.unset(x + i, y + 1);
        m.unset(x + i, y + 5);
        m.unset(x + 1, y + i);
        m.unset(x + 5, y + i);
    }
}

fn main() {
    let path = Path::new("write_test.png");

    let mut matrix = BitMatrix::new(29, 29);
    finder(&mut matrix, 4, 4);
    finder(&mut matrix, 18, 4);
    finder(&mut matrix, 4, 18);
    for i in (12..17).step_by(2) {
        matrix.set(i, 10);
        matrix.set(10, i);
    }

    let text = TextualInformation::new()
        .with(Keyword::Software, "barpng demo")
        .with(Keyword::Description, TextData::new("A few finder patterns, not a valid symbol").compressed(true))
        .with(Keyword::Comment, TextData::new("\u{2192} utf-8 works too").utf8(true));
    let renderer = Renderer::with_options(RenderOptions {
        textual_information: Some(text),
        ..RenderOptions::default()
    });

    let png = match renderer.render(&matrix, "barpng 0.1") {
        Ok(png) => png,
        Err(e) => panic!("failed to render png: {}", e),
    };
    if let Err(e) = std::fs::write(path, &png) {
        panic!("failed to write {}: {}", path.display(), e);
    }
    println!("Wrote {} bytes to {}", png.len(), path.display());
}
