fn main() {
    if let Err(err) = voicehome_lib::run() {
        eprintln!("{err:#}");
        std::process::exit(1);
    }
}
