use std::fs;
use std::path::Path;
use std::process::{Command, Output};

const TYPES: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<opc:TypeDictionary
  xmlns:opc="http://opcfoundation.org/BinarySchema/"
  xmlns:ua="http://opcfoundation.org/UA/"
  xmlns:tns="http://opcfoundation.org/UA/"
  DefaultByteOrder="LittleEndian"
  TargetNamespace="http://opcfoundation.org/UA/">
  <opc:Import Namespace="http://opcfoundation.org/BinarySchema/" />

  <opc:StructuredType Name="ReadValueId" BaseType="ua:ExtensionObject">
    <opc:Field Name="NodeId" TypeName="ua:NodeId" />
    <opc:Field Name="AttributeId" TypeName="opc:UInt32" />
    <opc:Field Name="DataEncoding" TypeName="ua:QualifiedName" />
    <opc:Field Name="Mode" TypeName="tns:TimestampsToReturn" />
  </opc:StructuredType>

  <opc:StructuredType Name="ReadRequest" BaseType="ua:ExtensionObject">
    <opc:Field Name="MaxAge" TypeName="opc:Double" />
    <opc:Field Name="NoOfNodesToRead" TypeName="opc:Int32" />
    <opc:Field Name="NodesToRead" TypeName="tns:ReadValueId" LengthField="NoOfNodesToRead" />
  </opc:StructuredType>

  <opc:EnumeratedType Name="TimestampsToReturn" LengthInBits="32">
    <opc:Documentation>Which timestamps to return.</opc:Documentation>
    <opc:EnumeratedValue Name="Source" Value="0" />
    <opc:EnumeratedValue Name="Server" Value="1" />
    <opc:EnumeratedValue Name="Both" Value="2" />
  </opc:EnumeratedType>

  <opc:OpaqueType Name="Image" />
  <opc:StructuredType Name="FilterOperand" BaseType="ua:ExtensionObject" />
  <opc:StructuredType Name="ScalarTestType" BaseType="ua:ExtensionObject">
    <opc:Field Name="Boolean" TypeName="opc:Boolean" />
  </opc:StructuredType>
  <opc:OpaqueType Name="TwoByteNodeId" />
</opc:TypeDictionary>
"#;

fn run(input: &Path, outfile: &Path) -> Output {
    Command::new(env!("CARGO_BIN_EXE_bsd-idl-generator"))
        .arg(input)
        .arg(outfile)
        .output()
        .expect("failed to launch the generator")
}

#[test]
fn generates_idl_module() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("Opc.Ua.Types.bsd");
    fs::write(&input, TYPES).unwrap();

    let output = run(&input, &dir.path().join("ua"));
    assert!(output.status.success(), "{output:?}");

    let idl = fs::read_to_string(dir.path().join("ua.idl")).unwrap();
    assert!(idl.starts_with("module UA {"));
    assert!(idl.ends_with("};\n"));

    let enumeration = idl.find("\tenum TimestampsToReturn {").unwrap();
    let read_value_id = idl.find("\tstruct ReadValueId {").unwrap();
    let read_request = idl.find("\tstruct ReadRequest {").unwrap();
    assert!(enumeration < read_value_id);
    assert!(read_value_id < read_request);

    assert!(idl.contains("\t\tListOfReadValueId NodesToRead;\n"));
    assert!(idl.contains("\t\t_Double MaxAge;\n"));
    assert!(!idl.contains("NoOfNodesToRead"));
    assert!(idl.contains("\ttypedef ByteString Image;\n"));
    assert!(idl.contains(
        "\tunion ListOfReadRequest switch(boolean) { case true: sequence<ReadRequest> Content; };"
    ));

    assert!(!idl.contains("FilterOperand"));
    assert!(!idl.contains("ScalarTestType"));
    assert!(!idl.contains("TwoByteNodeId"));
}

#[test]
fn unresolved_reference_fails_without_output() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("broken.bsd");
    let broken = TYPES.replace("tns:TimestampsToReturn", "tns:Missing");
    fs::write(&input, broken).unwrap();

    let output = run(&input, &dir.path().join("ua"));
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("\"Missing\""), "{stderr}");
    assert!(stderr.contains("\"ReadValueId\""), "{stderr}");
    assert!(!dir.path().join("ua.idl").exists());
}

#[test]
fn missing_input_fails() {
    let dir = tempfile::tempdir().unwrap();
    let output = run(&dir.path().join("absent.bsd"), &dir.path().join("ua"));
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("failed to read"));
}
