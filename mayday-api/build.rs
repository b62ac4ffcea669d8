//! Build script for the MAYDAY API crate
//!
//! Compiles the Protocol Buffer definitions into Rust code using
//! tonic-build. The generated code provides the AlertService server and
//! client along with the wire message types.

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tonic_build::configure()
        // Generate server code (we're implementing the service)
        .build_server(true)
        // Generate client code (the gateway and the tests dial the service)
        .build_client(true)
        .compile_protos(
            &["proto/mayday.proto"],
            &["proto"],
        )?;

    // Tell cargo to rerun this build script if the proto file changes
    println!("cargo:rerun-if-changed=proto/mayday.proto");

    Ok(())
}
