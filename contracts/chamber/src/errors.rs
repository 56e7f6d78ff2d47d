//! Chamber — Error Definitions
//!
//! Stable numeric error codes, grouped by concern the way the protocol's
//! events are grouped: clients match on these, so codes are never reused
//! or renumbered once shipped.

use soroban_sdk::contracterror;

#[contracterror]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum ChamberError {
    // Initialization / configuration
    AlreadyInitialized = 1,
    NotInitialized = 2,
    ZeroAddress = 3,
    ZeroSeats = 4,
    TooManySeats = 5,

    // Share vault
    ZeroAmount = 10,
    InsufficientChamberBalance = 11,
    ExceedsDelegatedAmount = 12,
    InsufficientAllowance = 13,

    // Delegation
    ZeroTokenId = 20,
    InvalidTokenId = 21,
    InsufficientDelegatedAmount = 22,

    // Board
    NodeDoesNotExist = 30,
    AmountExceedsDelegation = 31,
    MaxNodesReached = 32,
    CircuitBreakerActive = 33,

    // Seat update
    InvalidNumSeats = 40,
    InvalidProposal = 41,
    AlreadySentUpdateRequest = 42,
    TimelockNotExpired = 43,
    InsufficientVotes = 44,

    // Directorship gate
    NotDirector = 50,

    // Transaction queue
    InvalidTarget = 60,
    InvalidTransaction = 61,
    TransactionDoesNotExist = 62,
    TransactionAlreadyExecuted = 63,
    TransactionAlreadyConfirmed = 64,
    TransactionNotConfirmed = 65,
    TransactionFailed = 66,
    NotEnoughConfirmations = 67,
    ArrayLengthsMustMatch = 68,

    // Reentrancy
    ReentrantCall = 70,
}
