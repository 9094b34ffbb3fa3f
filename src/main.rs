fn main() {
    if let Err(err) = lif_visualizer::run() {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}
