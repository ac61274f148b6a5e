//! Transaction building and signing.
//!
//! Borsh wire format for NEAR transactions, reduced to the single action
//! this binary submits: a `FunctionCall`. The enum discriminants are fixed
//! by the NEAR protocol, so `Action` and the key/signature wrappers encode
//! their tags by hand instead of relying on derive ordering.

use std::io;

use borsh::BorshSerialize;

use crate::blockchain::key::AccountKey;
use crate::blockchain::types::{ChainError, ChainResult};

/// Protocol discriminant for a `FunctionCall` action.
const ACTION_FUNCTION_CALL: u8 = 2;

/// Protocol discriminant for ed25519 keys and signatures.
const KEY_TYPE_ED25519: u8 = 0;

/// An ed25519 public key in transaction wire form.
#[derive(Debug, Clone)]
pub struct PublicKey(pub [u8; 32]);

impl BorshSerialize for PublicKey {
    fn serialize<W: io::Write>(&self, writer: &mut W) -> io::Result<()> {
        KEY_TYPE_ED25519.serialize(writer)?;
        writer.write_all(&self.0)
    }
}

/// An ed25519 signature in transaction wire form.
#[derive(Debug, Clone)]
pub struct Signature(pub [u8; 64]);

impl BorshSerialize for Signature {
    fn serialize<W: io::Write>(&self, writer: &mut W) -> io::Result<()> {
        KEY_TYPE_ED25519.serialize(writer)?;
        writer.write_all(&self.0)
    }
}

/// Transaction actions. Only `FunctionCall` is ever built here.
#[derive(Debug, Clone)]
pub enum Action {
    FunctionCall {
        method_name: String,
        args: Vec<u8>,
        gas: u64,
        deposit: u128,
    },
}

impl BorshSerialize for Action {
    fn serialize<W: io::Write>(&self, writer: &mut W) -> io::Result<()> {
        match self {
            Action::FunctionCall {
                method_name,
                args,
                gas,
                deposit,
            } => {
                ACTION_FUNCTION_CALL.serialize(writer)?;
                method_name.serialize(writer)?;
                args.serialize(writer)?;
                gas.serialize(writer)?;
                deposit.serialize(writer)
            }
        }
    }
}

/// Unsigned transaction, field order fixed by the protocol.
#[derive(Debug, Clone, BorshSerialize)]
pub struct Transaction {
    pub signer_id: String,
    pub public_key: PublicKey,
    pub nonce: u64,
    pub receiver_id: String,
    pub block_hash: [u8; 32],
    pub actions: Vec<Action>,
}

/// A transaction plus its signature, ready to broadcast.
#[derive(Debug, Clone, BorshSerialize)]
pub struct SignedTransaction {
    pub transaction: Transaction,
    pub signature: Signature,
}

impl Transaction {
    /// Sign with the account key and return the broadcast-ready borsh bytes.
    pub fn sign(self, key: &AccountKey) -> ChainResult<Vec<u8>> {
        let tx_bytes = borsh::to_vec(&self)
            .map_err(|e| ChainError::Rpc(format!("transaction encoding failed: {}", e)))?;
        let signature = Signature(key.sign_transaction(&tx_bytes));
        borsh::to_vec(&SignedTransaction {
            transaction: self,
            signature,
        })
        .map_err(|e| ChainError::Rpc(format!("transaction encoding failed: {}", e)))
    }
}

/// Build a single-action function-call transaction.
pub fn function_call(
    signer_id: &str,
    key: &AccountKey,
    nonce: u64,
    receiver_id: &str,
    block_hash: [u8; 32],
    method_name: &str,
    args: Vec<u8>,
    gas: u64,
    deposit: u128,
) -> Transaction {
    Transaction {
        signer_id: signer_id.to_string(),
        public_key: PublicKey(key.public_key()),
        nonce,
        receiver_id: receiver_id.to_string(),
        block_hash,
        actions: vec![Action::FunctionCall {
            method_name: method_name.to_string(),
            args,
            gas,
            deposit,
        }],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transaction_wire_layout() {
        let tx = Transaction {
            signer_id: "alice.near".into(),
            public_key: PublicKey([0xAA; 32]),
            nonce: 7,
            receiver_id: "game.hot.tg".into(),
            block_hash: [0xBB; 32],
            actions: vec![Action::FunctionCall {
                method_name: "claim".into(),
                args: b"{}".to_vec(),
                gas: 30_000_000_000_000,
                deposit: 0,
            }],
        };
        let bytes = borsh::to_vec(&tx).unwrap();

        // signer_id: u32 LE length prefix + utf8
        assert_eq!(&bytes[0..4], &10u32.to_le_bytes());
        assert_eq!(&bytes[4..14], b"alice.near");
        // public key: tag byte then 32 raw bytes
        assert_eq!(bytes[14], 0);
        assert_eq!(&bytes[15..47], &[0xAA; 32]);
        // nonce: u64 LE
        assert_eq!(&bytes[47..55], &7u64.to_le_bytes());
        // receiver_id
        assert_eq!(&bytes[55..59], &11u32.to_le_bytes());
        assert_eq!(&bytes[59..70], b"game.hot.tg");
        // block hash
        assert_eq!(&bytes[70..102], &[0xBB; 32]);
        // one action, tagged FunctionCall
        assert_eq!(&bytes[102..106], &1u32.to_le_bytes());
        assert_eq!(bytes[106], ACTION_FUNCTION_CALL);
        // method name, args, gas, deposit
        assert_eq!(&bytes[107..111], &5u32.to_le_bytes());
        assert_eq!(&bytes[111..116], b"claim");
        assert_eq!(&bytes[116..120], &2u32.to_le_bytes());
        assert_eq!(&bytes[120..122], b"{}");
        assert_eq!(&bytes[122..130], &30_000_000_000_000u64.to_le_bytes());
        assert_eq!(&bytes[130..146], &0u128.to_le_bytes());
        assert_eq!(bytes.len(), 146);
    }

    #[test]
    fn test_signed_transaction_appends_signature() {
        let key = AccountKey::from_secret_key(&format!(
            "ed25519:{}",
            bs58::encode([5u8; 32]).into_string()
        ))
        .unwrap();
        let tx = function_call(
            "bob.near",
            &key,
            1,
            "game.hot.tg",
            [0u8; 32],
            "claim",
            b"{}".to_vec(),
            30_000_000_000_000,
            0,
        );
        let unsigned_len = borsh::to_vec(&tx).unwrap().len();
        let signed = tx.sign(&key).unwrap();
        // signature tag byte + 64 signature bytes
        assert_eq!(signed.len(), unsigned_len + 65);
        assert_eq!(signed[unsigned_len], 0);
    }
}
