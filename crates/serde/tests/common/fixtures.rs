//! Fixture models for serializer tests.
//!
//! `InfoDoc` is the smallest possible document. `Nfe` follows the shape of
//! an NF-e 4.00 invoice closely enough to exercise attributes, nested
//! objects, collections, enumerations and every scalar kind.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveTime};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use dfe_serde::metadata::{FieldDescriptor, FieldKind, RootDeclaration};
use dfe_serde::model::{DfeModel, FieldMut, FieldRef};

pub const NFE_NAMESPACE: &str = "http://www.portalfiscal.inf.br/nfe";

/// Single required field, root `infoDoc`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InfoDoc {
    pub razao_social: String,
}

impl InfoDoc {
    pub fn new(razao_social: impl Into<String>) -> Self {
        Self {
            razao_social: razao_social.into(),
        }
    }
}

impl DfeModel for InfoDoc {
    fn root() -> Option<RootDeclaration> {
        Some(RootDeclaration::new("infoDoc"))
    }

    fn describe() -> Vec<FieldDescriptor> {
        vec![
            FieldDescriptor::element("E01", "razaoSocial", FieldKind::String)
                .describe("Nome empresarial")
                .required(),
        ]
    }

    fn field(&self, index: usize) -> FieldRef<'_> {
        match index {
            0 => FieldRef::scalar(&self.razao_social),
            _ => FieldRef::Absent,
        }
    }

    fn field_mut(&mut self, index: usize) -> FieldMut<'_> {
        match index {
            0 => FieldMut::scalar(&mut self.razao_social),
            _ => FieldMut::Ignore,
        }
    }
}

dfe_serde::token_enum! {
    /// Identificação do ambiente.
    pub enum TipoAmbiente {
        Producao => "1",
        Homologacao => "2",
    }
}

impl Default for TipoAmbiente {
    fn default() -> Self {
        TipoAmbiente::Homologacao
    }
}

/// Root `NFe`, in the portal namespace.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Nfe {
    pub inf_nfe: InfNfe,
}

impl DfeModel for Nfe {
    fn root() -> Option<RootDeclaration> {
        Some(RootDeclaration::new("NFe"))
    }

    fn namespace() -> Option<&'static str> {
        Some(NFE_NAMESPACE)
    }

    fn describe() -> Vec<FieldDescriptor> {
        vec![
            FieldDescriptor::element("A01", "infNFe", FieldKind::NestedObject)
                .describe("Informações da NF-e")
                .required(),
        ]
    }

    fn field(&self, index: usize) -> FieldRef<'_> {
        match index {
            0 => FieldRef::object(&self.inf_nfe),
            _ => FieldRef::Absent,
        }
    }

    fn field_mut(&mut self, index: usize) -> FieldMut<'_> {
        match index {
            0 => FieldMut::object(&mut self.inf_nfe),
            _ => FieldMut::Ignore,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct InfNfe {
    pub versao: String,
    pub id: String,
    pub ide: Ide,
    pub emit: Emitente,
    pub det: Vec<Det>,
    pub inf_adic: Option<InfAdic>,
}

impl DfeModel for InfNfe {
    fn describe() -> Vec<FieldDescriptor> {
        vec![
            FieldDescriptor::attribute("A02", "versao", FieldKind::String)
                .describe("Versão do leiaute")
                .required()
                .occurs(4, 4),
            FieldDescriptor::attribute("A03", "Id", FieldKind::String)
                .describe("Identificador da TAG")
                .required()
                .occurs(47, 47),
            FieldDescriptor::element("B01", "ide", FieldKind::NestedObject).required(),
            FieldDescriptor::element("C01", "emit", FieldKind::NestedObject).required(),
            FieldDescriptor::element("H01", "det", FieldKind::collection(FieldKind::NestedObject))
                .describe("Detalhamento de produtos")
                .required()
                .occurs(1, 3),
            FieldDescriptor::element("Z01", "infAdic", FieldKind::NestedObject),
        ]
    }

    fn field(&self, index: usize) -> FieldRef<'_> {
        match index {
            0 => FieldRef::scalar(&self.versao),
            1 => FieldRef::scalar(&self.id),
            2 => FieldRef::object(&self.ide),
            3 => FieldRef::object(&self.emit),
            4 => FieldRef::objects(&self.det),
            5 => FieldRef::optional(&self.inf_adic),
            _ => FieldRef::Absent,
        }
    }

    fn field_mut(&mut self, index: usize) -> FieldMut<'_> {
        match index {
            0 => FieldMut::scalar(&mut self.versao),
            1 => FieldMut::scalar(&mut self.id),
            2 => FieldMut::object(&mut self.ide),
            3 => FieldMut::object(&mut self.emit),
            4 => FieldMut::objects(&mut self.det),
            5 => FieldMut::optional(&mut self.inf_adic),
            _ => FieldMut::Ignore,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Ide {
    pub c_uf: u8,
    pub nat_op: String,
    pub dh_emi: Option<DateTime<FixedOffset>>,
    pub d_sai_ent: Option<NaiveDate>,
    pub h_sai_ent: Option<NaiveTime>,
    pub tp_amb: TipoAmbiente,
}

impl DfeModel for Ide {
    fn describe() -> Vec<FieldDescriptor> {
        vec![
            FieldDescriptor::element("B02", "cUF", FieldKind::Integer)
                .describe("Código da UF do emitente")
                .required()
                .occurs(2, 2),
            FieldDescriptor::element("B04", "natOp", FieldKind::String)
                .describe("Natureza da operação")
                .required()
                .occurs(1, 60),
            FieldDescriptor::element("B09", "dhEmi", FieldKind::DateTime)
                .describe("Data e hora de emissão")
                .required(),
            FieldDescriptor::element("B10", "dSaiEnt", FieldKind::Date),
            FieldDescriptor::element("B10a", "hSaiEnt", FieldKind::Time),
            FieldDescriptor::element(
                "B24",
                "tpAmb",
                FieldKind::Enumerated(TipoAmbiente::TOKENS),
            )
            .describe("Tipo do ambiente")
            .required(),
        ]
    }

    fn field(&self, index: usize) -> FieldRef<'_> {
        match index {
            0 => FieldRef::scalar(&self.c_uf),
            1 => FieldRef::scalar(&self.nat_op),
            2 => FieldRef::scalar(&self.dh_emi),
            3 => FieldRef::scalar(&self.d_sai_ent),
            4 => FieldRef::scalar(&self.h_sai_ent),
            5 => FieldRef::scalar(&self.tp_amb),
            _ => FieldRef::Absent,
        }
    }

    fn field_mut(&mut self, index: usize) -> FieldMut<'_> {
        match index {
            0 => FieldMut::scalar(&mut self.c_uf),
            1 => FieldMut::scalar(&mut self.nat_op),
            2 => FieldMut::scalar(&mut self.dh_emi),
            3 => FieldMut::scalar(&mut self.d_sai_ent),
            4 => FieldMut::scalar(&mut self.h_sai_ent),
            5 => FieldMut::scalar(&mut self.tp_amb),
            _ => FieldMut::Ignore,
        }
    }
}

/// Not a document on its own: no root declaration.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Emitente {
    pub cnpj: String,
    pub x_nome: String,
    pub x_fant: String,
}

impl DfeModel for Emitente {
    fn describe() -> Vec<FieldDescriptor> {
        vec![
            FieldDescriptor::element("C02", "CNPJ", FieldKind::String)
                .describe("CNPJ do emitente")
                .required()
                .occurs(14, 14),
            FieldDescriptor::element("C03", "xNome", FieldKind::String)
                .describe("Razão social ou nome do emitente")
                .required()
                .occurs(2, 60),
            FieldDescriptor::element("C04", "xFant", FieldKind::String)
                .describe("Nome fantasia")
                .occurs(1, 60),
        ]
    }

    fn field(&self, index: usize) -> FieldRef<'_> {
        match index {
            0 => FieldRef::scalar(&self.cnpj),
            1 => FieldRef::scalar(&self.x_nome),
            2 => FieldRef::scalar(&self.x_fant),
            _ => FieldRef::Absent,
        }
    }

    fn field_mut(&mut self, index: usize) -> FieldMut<'_> {
        match index {
            0 => FieldMut::scalar(&mut self.cnpj),
            1 => FieldMut::scalar(&mut self.x_nome),
            2 => FieldMut::scalar(&mut self.x_fant),
            _ => FieldMut::Ignore,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Det {
    pub n_item: u32,
    pub prod: Produto,
}

impl DfeModel for Det {
    fn describe() -> Vec<FieldDescriptor> {
        vec![
            FieldDescriptor::attribute("H02", "nItem", FieldKind::Integer)
                .describe("Número do item")
                .required(),
            FieldDescriptor::element("I01", "prod", FieldKind::NestedObject).required(),
        ]
    }

    fn field(&self, index: usize) -> FieldRef<'_> {
        match index {
            0 => FieldRef::scalar(&self.n_item),
            1 => FieldRef::object(&self.prod),
            _ => FieldRef::Absent,
        }
    }

    fn field_mut(&mut self, index: usize) -> FieldMut<'_> {
        match index {
            0 => FieldMut::scalar(&mut self.n_item),
            1 => FieldMut::object(&mut self.prod),
            _ => FieldMut::Ignore,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Produto {
    pub c_prod: String,
    pub x_prod: String,
    pub q_com: Decimal,
    pub v_prod: Decimal,
}

impl DfeModel for Produto {
    fn describe() -> Vec<FieldDescriptor> {
        vec![
            FieldDescriptor::element("I02", "cProd", FieldKind::String)
                .describe("Código do produto")
                .required()
                .occurs(1, 60),
            FieldDescriptor::element("I04", "xProd", FieldKind::String)
                .describe("Descrição do produto")
                .required()
                .occurs(1, 120),
            FieldDescriptor::element("I10", "qCom", FieldKind::Decimal)
                .describe("Quantidade comercial")
                .required()
                .decimals(4),
            FieldDescriptor::element("I11", "vProd", FieldKind::Decimal)
                .describe("Valor total bruto")
                .required()
                .decimals(2),
        ]
    }

    fn field(&self, index: usize) -> FieldRef<'_> {
        match index {
            0 => FieldRef::scalar(&self.c_prod),
            1 => FieldRef::scalar(&self.x_prod),
            2 => FieldRef::scalar(&self.q_com),
            3 => FieldRef::scalar(&self.v_prod),
            _ => FieldRef::Absent,
        }
    }

    fn field_mut(&mut self, index: usize) -> FieldMut<'_> {
        match index {
            0 => FieldMut::scalar(&mut self.c_prod),
            1 => FieldMut::scalar(&mut self.x_prod),
            2 => FieldMut::scalar(&mut self.q_com),
            3 => FieldMut::scalar(&mut self.v_prod),
            _ => FieldMut::Ignore,
        }
    }
}

/// Declares an empty namespace, which output normalization removes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InfAdic {
    pub inf_cpl: String,
    pub obs_cont: Vec<String>,
}

impl DfeModel for InfAdic {
    fn namespace() -> Option<&'static str> {
        Some("")
    }

    fn describe() -> Vec<FieldDescriptor> {
        vec![
            FieldDescriptor::element("Z03", "infCpl", FieldKind::String).occurs(1, 5000),
            FieldDescriptor::element("Z04", "obsCont", FieldKind::collection(FieldKind::String))
                .describe("Observações do contribuinte")
                .occurs(2, 4),
        ]
    }

    fn field(&self, index: usize) -> FieldRef<'_> {
        match index {
            0 => FieldRef::scalar(&self.inf_cpl),
            1 => FieldRef::values(&self.obs_cont),
            _ => FieldRef::Absent,
        }
    }

    fn field_mut(&mut self, index: usize) -> FieldMut<'_> {
        match index {
            0 => FieldMut::scalar(&mut self.inf_cpl),
            1 => FieldMut::values(&mut self.obs_cont),
            _ => FieldMut::Ignore,
        }
    }
}

/// Generic wrapper; cannot be bound as a document.
#[derive(Debug, Default)]
pub struct Lote<T> {
    pub itens: Vec<T>,
}

impl<T: DfeModel> DfeModel for Lote<T> {
    fn root() -> Option<RootDeclaration> {
        Some(RootDeclaration::new("lote"))
    }

    fn describe() -> Vec<FieldDescriptor> {
        vec![FieldDescriptor::element(
            "L01",
            "item",
            FieldKind::collection(FieldKind::NestedObject),
        )]
    }

    fn field(&self, index: usize) -> FieldRef<'_> {
        match index {
            0 => FieldRef::objects(&self.itens),
            _ => FieldRef::Absent,
        }
    }

    fn field_mut(&mut self, index: usize) -> FieldMut<'_> {
        match index {
            0 => FieldMut::objects(&mut self.itens),
            _ => FieldMut::Ignore,
        }
    }
}

/// Declares `min_occurs` above `max_occurs`.
#[derive(Debug, Default)]
pub struct LimitesInvertidos {
    pub codigo: String,
}

impl DfeModel for LimitesInvertidos {
    fn root() -> Option<RootDeclaration> {
        Some(RootDeclaration::new("limites"))
    }

    fn describe() -> Vec<FieldDescriptor> {
        vec![FieldDescriptor::element("X01", "codigo", FieldKind::String).occurs(10, 2)]
    }

    fn field(&self, index: usize) -> FieldRef<'_> {
        match index {
            0 => FieldRef::scalar(&self.codigo),
            _ => FieldRef::Absent,
        }
    }

    fn field_mut(&mut self, index: usize) -> FieldMut<'_> {
        match index {
            0 => FieldMut::scalar(&mut self.codigo),
            _ => FieldMut::Ignore,
        }
    }
}

/// Sequence counter with an optional wide number and required notes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Contador {
    pub n_seq: Option<u64>,
    pub obs: Vec<String>,
}

impl DfeModel for Contador {
    fn root() -> Option<RootDeclaration> {
        Some(RootDeclaration::new("contador"))
    }

    fn describe() -> Vec<FieldDescriptor> {
        vec![
            FieldDescriptor::element("C01", "nSeq", FieldKind::Integer),
            FieldDescriptor::element("C02", "obs", FieldKind::collection(FieldKind::String))
                .required()
                .occurs(1, 3),
        ]
    }

    fn field(&self, index: usize) -> FieldRef<'_> {
        match index {
            0 => FieldRef::scalar(&self.n_seq),
            1 => FieldRef::values(&self.obs),
            _ => FieldRef::Absent,
        }
    }

    fn field_mut(&mut self, index: usize) -> FieldMut<'_> {
        match index {
            0 => FieldMut::scalar(&mut self.n_seq),
            1 => FieldMut::values(&mut self.obs),
            _ => FieldMut::Ignore,
        }
    }
}

pub fn item(n_item: u32, c_prod: &str, x_prod: &str, q_com: Decimal, v_prod: Decimal) -> Det {
    Det {
        n_item,
        prod: Produto {
            c_prod: c_prod.to_string(),
            x_prod: x_prod.to_string(),
            q_com,
            v_prod,
        },
    }
}

pub fn emission_time() -> DateTime<FixedOffset> {
    DateTime::parse_from_rfc3339("2024-05-10T14:30:00-03:00").expect("valid timestamp")
}

/// A complete invoice that serializes without alerts.
pub fn sample_nfe() -> Nfe {
    Nfe {
        inf_nfe: InfNfe {
            versao: "4.00".to_string(),
            id: "NFe35240512345678000190550010000000011000000019".to_string(),
            ide: Ide {
                c_uf: 35,
                nat_op: "Venda de mercadoria".to_string(),
                dh_emi: Some(emission_time()),
                d_sai_ent: NaiveDate::from_ymd_opt(2024, 5, 11),
                h_sai_ent: NaiveTime::from_hms_opt(8, 15, 0),
                tp_amb: TipoAmbiente::Homologacao,
            },
            emit: Emitente {
                cnpj: "12345678000190".to_string(),
                x_nome: "Padaria Pão Quente Ltda".to_string(),
                x_fant: "Pão Quente".to_string(),
            },
            det: vec![
                item(1, "001", "Pão francês", dec!(2.5), dec!(37.50)),
                item(2, "002", "Café & leite", dec!(1), dec!(8.9)),
            ],
            inf_adic: Some(InfAdic {
                inf_cpl: "Entrega <urgente>".to_string(),
                obs_cont: vec!["lote 7".to_string(), "validade 30 dias".to_string()],
            }),
        },
    }
}
