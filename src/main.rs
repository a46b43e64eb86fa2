fn main() {
    esgbridge_lib::run()
}
