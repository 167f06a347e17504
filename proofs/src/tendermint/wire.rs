//! Protobuf messages of Tendermint proof operators.
//!
//! Amino encodes these structs field for field like protobuf, so `prost`
//! reads them directly once the amino length prefix is stripped.

/// Envelope of a Tendermint Merkle proof.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProofOps {
    #[prost(message, repeated, tag = "1")]
    pub ops: ::prost::alloc::vec::Vec<ProofOp>,
}

/// One operator of the chain.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProofOp {
    #[prost(string, tag = "1")]
    pub r#type: ::prost::alloc::string::String,
    #[prost(bytes = "vec", tag = "2")]
    pub key: ::prost::alloc::vec::Vec<u8>,
    #[prost(bytes = "vec", tag = "3")]
    pub data: ::prost::alloc::vec::Vec<u8>,
}

/// Payload of `iavl:v`.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct IavlValueOp {
    #[prost(message, optional, tag = "1")]
    pub proof: ::core::option::Option<RangeProof>,
}

/// Payload of `iavl:a`.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct IavlAbsenceOp {
    #[prost(message, optional, tag = "1")]
    pub proof: ::core::option::Option<RangeProof>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct RangeProof {
    #[prost(message, repeated, tag = "1")]
    pub left_path: ::prost::alloc::vec::Vec<ProofInnerNode>,
    #[prost(message, repeated, tag = "2")]
    pub inner_nodes: ::prost::alloc::vec::Vec<PathToLeaf>,
    #[prost(message, repeated, tag = "3")]
    pub leaves: ::prost::alloc::vec::Vec<ProofLeafNode>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct PathToLeaf {
    #[prost(message, repeated, tag = "1")]
    pub inners: ::prost::alloc::vec::Vec<ProofInnerNode>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProofInnerNode {
    #[prost(int32, tag = "1")]
    pub height: i32,
    #[prost(int64, tag = "2")]
    pub size: i64,
    #[prost(int64, tag = "3")]
    pub version: i64,
    #[prost(bytes = "vec", tag = "4")]
    pub left: ::prost::alloc::vec::Vec<u8>,
    #[prost(bytes = "vec", tag = "5")]
    pub right: ::prost::alloc::vec::Vec<u8>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProofLeafNode {
    #[prost(bytes = "vec", tag = "1")]
    pub key: ::prost::alloc::vec::Vec<u8>,
    #[prost(bytes = "vec", tag = "2")]
    pub value_hash: ::prost::alloc::vec::Vec<u8>,
    #[prost(int64, tag = "3")]
    pub version: i64,
}

/// Payload of `multistore`.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct MultiStoreProofOp {
    #[prost(message, optional, tag = "1")]
    pub proof: ::core::option::Option<MultiStoreProof>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct MultiStoreProof {
    #[prost(message, repeated, tag = "1")]
    pub store_infos: ::prost::alloc::vec::Vec<StoreInfo>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct StoreInfo {
    #[prost(string, tag = "1")]
    pub name: ::prost::alloc::string::String,
    #[prost(message, optional, tag = "2")]
    pub core: ::core::option::Option<StoreCore>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct StoreCore {
    #[prost(message, optional, tag = "1")]
    pub commit_id: ::core::option::Option<CommitId>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct CommitId {
    #[prost(int64, tag = "1")]
    pub version: i64,
    #[prost(bytes = "vec", tag = "2")]
    pub hash: ::prost::alloc::vec::Vec<u8>,
}

/// Payload of `simple:v`.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct SimpleValueOp {
    #[prost(message, optional, tag = "1")]
    pub proof: ::core::option::Option<SimpleProof>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct SimpleProof {
    #[prost(int64, tag = "1")]
    pub total: i64,
    #[prost(int64, tag = "2")]
    pub index: i64,
    #[prost(bytes = "vec", tag = "3")]
    pub leaf_hash: ::prost::alloc::vec::Vec<u8>,
    #[prost(bytes = "vec", repeated, tag = "4")]
    pub aunts: ::prost::alloc::vec::Vec<::prost::alloc::vec::Vec<u8>>,
}
