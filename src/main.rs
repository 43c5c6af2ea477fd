fn main() -> eframe::Result {
    lasso_pixels::run_native()
}
