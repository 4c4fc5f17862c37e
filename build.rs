fn main() {
    // Build scripts run on the host, so check the *target* OS via Cargo's env.
    let target_os = std::env::var("CARGO_CFG_TARGET_OS").unwrap_or_default();
    if target_os == "ios" {
        // Frameworks reached only through the Objective-C runtime (msg_send!)
        // still have to be linked so their classes are registered at launch.
        for framework in ["UIKit", "ARKit", "SceneKit", "CoreMotion"] {
            println!("cargo:rustc-link-lib=framework={}", framework);
        }
    }
    println!("cargo:rerun-if-changed=build.rs");
}
