fn main() -> Result<(), Box<dyn std::error::Error>> {
    tonic_prost_build::configure()
        .build_server(true)
        .build_client(true)
        .compile_protos(&["proto/api/v1/test_service.proto"], &["proto"])?;

    println!("cargo:rerun-if-changed=proto/api/v1/test_service.proto");

    Ok(())
}
