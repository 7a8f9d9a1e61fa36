fn main() {
    snipshare_cli::run_main();
}
