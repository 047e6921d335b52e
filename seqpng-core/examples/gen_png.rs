use seqpng_core::Engine;
use std::env;
use std::fs;

fn main() {
    let args: Vec<String> = env::args().collect();
    let input_file = args.get(1).expect("Usage: gen_png <input.txt> [output.png]");
    let output_file = args.get(2).map(String::as_str).unwrap_or("out.png");

    let input = fs::read_to_string(input_file).expect("Failed to read input file");
    let png = Engine::new()
        .render_png(&input)
        .unwrap_or_else(|err| panic!("{input_file}: {err}"));
    fs::write(output_file, &png).expect("Failed to write output file");
    println!("{output_file}: {} bytes", png.len());
}
