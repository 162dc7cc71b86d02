//! Shared schema fixture for emitter tests.

use oddgen_schema::{GeneratorConfig, ResolvedSchema, SchemaModel, build, load_tree};

pub(crate) const SCHEMA: &str = r#"<TEI xmlns="http://www.tei-c.org/ns/1.0" xmlns:rng="http://relaxng.org/ns/structure/1.0">
  <classSpec ident="att.id" type="atts" module="MEI.shared">
    <attList><attDef ident="xml:id"><datatype><rng:data type="ID"/></datatype></attDef></attList>
  </classSpec>
  <classSpec ident="att.typed" type="atts" module="MEI.shared">
    <attList>
      <attDef ident="n"><desc>Number or label.</desc><datatype><rng:data type="NMTOKEN"/></datatype></attDef>
      <attDef ident="xlink:href"><datatype><rng:data type="anyURI"/></datatype></attDef>
    </attList>
  </classSpec>
  <classSpec ident="att.sized" type="atts" module="MEI.shared">
    <classes><memberOf key="att.typed"/></classes>
    <attList>
      <attDef ident="size"><datatype><rng:data type="integer"/></datatype></attDef>
      <attDef ident="ratio"><datatype><rng:data type="decimal"/></datatype></attDef>
    </attList>
  </classSpec>
  <classSpec ident="att.spacing" type="atts" module="MEI.shared">
    <attList>
      <attDef ident="width"><datatype><rng:ref name="data.MEASUREMENTABS"/></datatype></attDef>
    </attList>
  </classSpec>
  <classSpec ident="att.accid" type="atts" module="MEI.cmn">
    <attList>
      <attDef ident="func">
        <valList type="closed"><valItem ident="4.5"/><valItem ident="C+"/></valList>
      </attDef>
      <attDef ident="visible"><datatype><rng:ref name="data.BOOLEAN"/></datatype></attDef>
    </attList>
  </classSpec>
  <classSpec ident="att.marker" type="atts" module="MEI.cmn"/>
  <macroSpec ident="data.BOOLEAN" type="dt" module="MEI">
    <content><valList type="closed"><valItem ident="true"/><valItem ident="false"/></valList></content>
  </macroSpec>
  <macroSpec ident="data.MEASUREMENTABS" type="dt" module="MEI">
    <content><valList type="closed"><valItem ident="thin"/><valItem ident="thick"/></valList></content>
  </macroSpec>
  <macroSpec ident="data.CLASH" type="dt" module="MEI">
    <content><valList type="closed"><valItem ident="a.b"/><valItem ident="a-b"/></valList></content>
  </macroSpec>
  <elementSpec ident="note" module="MEI.shared">
    <desc>A single pitched event.</desc>
    <classes>
      <memberOf key="att.id"/>
      <memberOf key="att.sized"/>
      <memberOf key="att.spacing"/>
      <memberOf key="att.marker"/>
    </classes>
  </elementSpec>
  <elementSpec ident="accid" module="MEI.cmn">
    <classes><memberOf key="att.accid"/></classes>
    <attList>
      <attDef ident="type"><datatype><rng:data type="NMTOKEN"/></datatype></attDef>
    </attList>
  </elementSpec>
</TEI>"#;

const CONFIG: &str = r#"
modules:
  shared:
    att.sized:
      size:
        type: int
        default: 0
alternates:
  - data.MEASUREMENTABS
"#;

pub(crate) fn config() -> GeneratorConfig {
    GeneratorConfig::from_yaml_str(CONFIG).expect("Failed to parse config")
}

pub(crate) fn model() -> SchemaModel {
    let doc = load_tree(SCHEMA).expect("Failed to load schema");
    build(&doc).expect("Failed to build model")
}

pub(crate) fn resolve(config: &GeneratorConfig) -> ResolvedSchema {
    ResolvedSchema::from_model(&model(), config)
}
