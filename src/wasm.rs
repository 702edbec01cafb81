use js_sys::Array;
use wasm_bindgen::prelude::*;

use crate::generator::Generator;

/// Generate a `width` by `height` puzzle from `seed`.
///
/// Returns a pair of arrays of row strings: the puzzle, then its solution.
#[wasm_bindgen(js_name = generatePuzzle)]
pub fn generate_puzzle(width: usize, height: usize, seed: u32) -> Result<Array, JsError> {
    let puzzle = Generator::new(width, height)?
        .seed(seed.into())
        .generate()?;

    let puzzle_rows = puzzle.to_string().lines().map(JsValue::from).collect::<Array>();
    let solution_rows = puzzle.rendered().solution_string().lines().map(JsValue::from).collect::<Array>();

    Ok(Array::of2(&puzzle_rows, &solution_rows))
}
