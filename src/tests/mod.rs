mod token_lifecycle;
