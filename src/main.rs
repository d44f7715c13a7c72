fn main() {
    phorge_flow::app::cli::run();
}
